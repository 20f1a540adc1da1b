/*!
 * Text-generation backend clients.
 *
 * This module contains client implementations for the external
 * text-generation backends the engine can talk to:
 * - OpenAI-compatible chat completion APIs
 * - Anthropic messages API
 * - A scriptable mock for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::cost::TokenUsage;
use crate::errors::ProviderError;

pub mod anthropic;
pub mod mock;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

/// One completion request sent to a backend.
///
/// The engine builds exactly this shape regardless of the backend; each
/// client maps it onto its own wire format.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction selecting role, target language and constraints
    pub system_prompt: String,
    /// The text to operate on, with any wrapping instructions
    pub user_prompt: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token budget
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with the given model and prompts
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: model.into(),
            temperature: 0.3,
            max_output_tokens: 1024,
        }
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token budget
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// The backend's answer: generated text plus token accounting
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Token usage reported by the backend
    pub usage: TokenUsage,
}

/// Common trait for all text-generation backends
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request against this backend
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ProviderError>;

    /// Short backend name for logs and cost metadata
    fn name(&self) -> &str;
}
