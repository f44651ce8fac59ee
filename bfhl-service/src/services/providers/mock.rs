//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned behaviour for [`MockTextProvider`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Empty,
    Fail,
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    reply: MockReply,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    /// Hold every call for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: 1,
            }),
            MockReply::Empty => Ok(ProviderResponse::default()),
            MockReply::Fail => Err(ProviderError::ApiError(
                "Mock provider configured to fail".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
