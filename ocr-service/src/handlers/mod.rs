//! HTTP handlers for the OCR service.

pub mod health;
pub mod ocr;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use ocr::extract_text;
