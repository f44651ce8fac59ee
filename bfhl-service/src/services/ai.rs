//! One-word answers from a generative text provider.
//!
//! [`AiDelegate::answer`] never fails: provider errors come back as
//! [`ERROR_ANSWER`] and a response without text as [`UNKNOWN_ANSWER`].
//! Callers that need the distinction use [`AiDelegate::try_answer`].

use super::providers::{ProviderError, TextProvider};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Returned when the provider call fails for any reason.
pub const ERROR_ANSWER: &str = "Error";

/// Returned when the provider answers without any text.
pub const UNKNOWN_ANSWER: &str = "Unknown";

const PROMPT_PREFIX: &str = "Answer in ONE word only: ";

#[derive(Clone)]
pub struct AiDelegate {
    provider: Arc<dyn TextProvider>,
    permits: Arc<Semaphore>,
}

impl AiDelegate {
    /// `max_concurrency` bounds in-flight provider calls; zero is treated as one.
    pub fn new(provider: Arc<dyn TextProvider>, max_concurrency: usize) -> Self {
        Self {
            provider,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub async fn answer(&self, question: &str) -> String {
        match self.try_answer(question).await {
            Ok(word) => word,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "AI provider call failed"
                );
                ERROR_ANSWER.to_string()
            }
        }
    }

    pub async fn try_answer(&self, question: &str) -> Result<String, ProviderError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;

        let prompt = format!("{}{}", PROMPT_PREFIX, question);
        let response = self.provider.generate(&prompt).await?;

        tracing::debug!(
            provider = self.provider.name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "AI provider answered"
        );

        Ok(first_word(response.text.as_deref()))
    }
}

/// First whitespace-delimited token, or [`UNKNOWN_ANSWER`] when there is none.
pub fn first_word(text: Option<&str>) -> String {
    text.and_then(|t| t.split_whitespace().next())
        .unwrap_or(UNKNOWN_ANSWER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockReply, MockTextProvider};
    use std::time::Duration;

    #[test]
    fn first_word_trims_to_single_token() {
        assert_eq!(first_word(Some("Paris is the capital")), "Paris");
        assert_eq!(first_word(Some("Paris\n")), "Paris");
        assert_eq!(first_word(Some("  Mumbai.")), "Mumbai.");
        assert_eq!(first_word(Some("")), UNKNOWN_ANSWER);
        assert_eq!(first_word(Some("   ")), UNKNOWN_ANSWER);
        assert_eq!(first_word(None), UNKNOWN_ANSWER);
    }

    #[tokio::test]
    async fn answer_returns_first_word() {
        let delegate = AiDelegate::new(Arc::new(MockTextProvider::replying("Mumbai is big")), 4);
        assert_eq!(delegate.answer("Capital of Maharashtra?").await, "Mumbai");
    }

    #[tokio::test]
    async fn answer_without_text_is_unknown() {
        let delegate = AiDelegate::new(Arc::new(MockTextProvider::new(MockReply::Empty)), 4);
        assert_eq!(delegate.answer("anything").await, UNKNOWN_ANSWER);
    }

    #[tokio::test]
    async fn provider_failure_collapses_to_error() {
        let delegate = AiDelegate::new(Arc::new(MockTextProvider::new(MockReply::Fail)), 4);
        assert!(delegate.try_answer("anything").await.is_err());
        assert_eq!(delegate.answer("anything").await, ERROR_ANSWER);
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let provider = Arc::new(
            MockTextProvider::replying("ok").with_delay(Duration::from_millis(200)),
        );
        let delegate = AiDelegate::new(provider.clone(), 1);

        let first = tokio::spawn({
            let delegate = delegate.clone();
            async move { delegate.answer("one").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(delegate.permits.available_permits(), 0);

        let second = tokio::spawn({
            let delegate = delegate.clone();
            async move { delegate.answer("two").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        // second caller is parked on the semaphore, not in the provider
        assert_eq!(provider.calls(), 1);

        assert_eq!(first.await.unwrap(), "ok");
        assert_eq!(second.await.unwrap(), "ok");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn zero_concurrency_still_allows_one_call() {
        let delegate = AiDelegate::new(Arc::new(MockTextProvider::replying("yes")), 0);
        assert_eq!(delegate.answer("q").await, "yes");
    }
}
