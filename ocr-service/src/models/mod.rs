//! Request and response shapes for the OCR endpoint.

pub mod extraction;

pub use extraction::{ExtractionResponse, ImageUpload, EXTRACTION_PROMPT, FILE_FIELD};
