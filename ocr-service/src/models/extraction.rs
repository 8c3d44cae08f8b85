use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Multipart field that carries the image.
pub const FILE_FIELD: &str = "file";

/// Instruction sent alongside every image.
pub const EXTRACTION_PROMPT: &str = "Extract all handwritten text from this image clearly.\n\
Preserve line breaks and formatting exactly.\n\
Only return the text content.";

/// Raw upload as received from the client. Lives for a single request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Successful `POST /ocr` body. The text is relayed exactly as the model
/// returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub extracted_text: String,
}
