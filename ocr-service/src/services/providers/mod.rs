//! Vision model provider abstractions and implementations.
//!
//! The handler only sees [`VisionProvider`], so the Gemini backend can be
//! swapped for the mock in tests without touching the environment.

pub mod gemini;
pub mod mock;

use crate::services::image::DecodedImage;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::Timeout => "timeout",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// A multimodal model that turns an instruction plus an image into text.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Generate text for `prompt` about `image`.
    async fn generate(&self, prompt: &str, image: &DecodedImage) -> Result<String, ProviderError>;

    /// Health check. Must not call the remote model.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
