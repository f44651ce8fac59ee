//! AI provider abstractions and implementations.
//!
//! The AI delegate only depends on [`TextProvider`], so the Gemini backend
//! can be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider response.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Text of the first candidate's first part, if any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
