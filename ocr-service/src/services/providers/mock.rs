//! Mock provider implementation for testing.

use super::{ProviderError, VisionProvider};
use crate::services::image::DecodedImage;
use async_trait::async_trait;
use image::ImageFormat;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock saw on its most recent call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Mock vision provider for testing.
///
/// Returns a canned outcome, optionally after a delay, and counts calls.
pub struct MockVisionProvider {
    enabled: bool,
    outcome: Result<String, ProviderError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_call: Mutex<Option<RecordedCall>>,
}

impl MockVisionProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            outcome: Ok("Mock extracted text".to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn responding(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            ..Self::new(true)
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::new(true)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last_call
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str, image: &DecodedImage) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let call = RecordedCall {
            prompt: prompt.to_string(),
            width: image.width(),
            height: image.height(),
            format: image.format(),
        };
        match self.last_call.lock() {
            Ok(mut guard) => *guard = Some(call),
            Err(poisoned) => *poisoned.into_inner() = Some(call),
        }

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock vision provider not enabled".to_string(),
            ));
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.clone()
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock vision provider not enabled".to_string(),
            ))
        }
    }
}
