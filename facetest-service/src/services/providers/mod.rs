//! AI provider abstractions and implementations.
//!
//! Handlers talk to the model through [`VisionProvider`], so the Gemini
//! backend can be swapped for the scripted mock in tests.

pub mod gemini;
pub mod mock;

use crate::intake::ImageDataUrl;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Concatenated text of the first candidate; empty if it had none.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// Sampling parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: i32,
}

/// A multimodal model that answers a text prompt about one image.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send the prompt and the image in a single request. No retries.
    async fn generate(
        &self,
        prompt: &str,
        image: &ImageDataUrl,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Whether the provider can serve requests at all.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
