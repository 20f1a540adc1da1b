/*!
 * Error types for the polypress translation pipeline.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::language::LanguageCode;

/// Errors that can occur when talking to a text-generation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting (HTTP 429 and friends)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether retrying the request later can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::RateLimitExceeded(_))
    }
}

/// Errors that can occur while translating a single field or long body
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the backend provider
    #[error("Backend error: {0}")]
    Backend(#[from] ProviderError),

    /// The backend returned an empty translation
    #[error("Backend returned an empty translation")]
    EmptyResponse,

    /// A chunk within a long body failed; the whole field is aborted
    #[error("Chunk {index} failed: {source}")]
    ChunkFailed {
        /// Zero-based index of the failing chunk
        index: usize,
        /// The underlying failure
        #[source]
        source: Box<TranslationError>,
    },
}

impl TranslationError {
    /// Whether the failure is backend backpressure that the batch loop may retry
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::Backend(e) => e.is_retryable(),
            TranslationError::ChunkFailed { source, .. } => source.is_retryable(),
            TranslationError::EmptyResponse => false,
        }
    }
}

/// Errors raised by strict encoding validation
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The byte sequence is not valid UTF-8
    #[error("Invalid UTF-8 sequence at byte {position}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence
        position: usize,
    },
}

/// Errors raised by the orchestration layer
#[derive(Error, Debug)]
pub enum OrchestrationError {
    /// The language code is not part of the supported set
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// A non-deleted artifact already exists for this (content, language) pair
    #[error("A translation of content {content_id} into {language} already exists")]
    DuplicateTranslation {
        /// Source content identifier
        content_id: String,
        /// Target language of the existing artifact
        language: LanguageCode,
    },

    /// The target language equals the source language
    #[error("Target language {0} equals the source language")]
    SameAsSource(LanguageCode),

    /// The source content was not found in the content store
    #[error("Source content not found: {0}")]
    ContentNotFound(String),

    /// A field translation failed
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// The content store rejected an operation
    #[error("Store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for OrchestrationError {
    fn from(error: anyhow::Error) -> Self {
        Self::Store(error.to_string())
    }
}
