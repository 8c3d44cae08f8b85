use crate::services::{ImageDecodeError, ProviderError};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use service_core::error::AppError;
use thiserror::Error;

/// Failures of a single `POST /ocr` request.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("No file uploaded")]
    MissingFilePart,

    #[error("Exactly one file part is allowed")]
    DuplicateFilePart,

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageDecodeError),

    #[error("Text extraction failed: {0}")]
    Inference(#[from] ProviderError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::MissingFilePart | OcrError::DuplicateFilePart => {
                AppError::BadRequest(anyhow::anyhow!(err.to_string()))
            }
            OcrError::Multipart(e) => {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(anyhow::anyhow!("Upload exceeds the size limit"))
                } else {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read multipart body"))
                }
            }
            OcrError::InvalidImage(_) => {
                AppError::BadRequest(anyhow::anyhow!("Uploaded file is not a valid image"))
            }
            OcrError::Inference(e) => match e {
                ProviderError::NotConfigured(_) => {
                    AppError::InternalError(anyhow::anyhow!("Text extraction failed"))
                }
                ProviderError::RateLimited => AppError::ServiceUnavailable,
                ProviderError::Timeout => AppError::GatewayTimeout,
                _ => AppError::BadGateway("Text extraction failed".to_string()),
            },
            OcrError::Internal(e) => AppError::InternalError(e),
        }
    }
}
