/*!
 * # polypress - Multilingual Editorial Translation Pipeline
 *
 * A Rust library for translating structured editorial content (titles,
 * excerpts, long HTML bodies, FAQs, image captions) from one source
 * language into up to nine target languages, producing per-language
 * artifacts with correct slugs, sanitized Unicode text, and cost
 * accounting.
 *
 * ## Features
 *
 * - Orchestrated translation across many target languages with
 *   per-language fault isolation
 * - Long-text chunking that preserves HTML structural boundaries
 * - Result caching with a 30-day expiry
 * - Cost accounting for every backend call
 * - Script-aware slug transliteration (Cyrillic, Chinese, Arabic,
 *   Devanagari)
 * - Encoding validation and Unicode sanitization
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `config`: Configuration management
 * - `language`: Supported language codes and script metadata
 * - `content`: Domain models for source content and translated artifacts
 * - `cost`: Cost records, accumulator and pricing
 * - `encoding`: Encoding validation and text sanitization
 * - `slug`: Slug generation and per-script transliteration
 * - `engine`: Core field translation, chunking and prompt construction
 * - `orchestrator`: Batch coordination across target languages
 * - `providers`: Clients for text-generation backends:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Scriptable mock for tests
 * - `store`: Content store, cache store and cost ledger surfaces with
 *   SQLite and in-memory implementations
 * - `errors`: Custom error types for the pipeline
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod config;
pub mod content;
pub mod cost;
pub mod encoding;
pub mod engine;
pub mod errors;
pub mod language;
pub mod orchestrator;
pub mod providers;
pub mod slug;
pub mod store;

// Re-export main types for easier usage
pub use config::Config;
pub use content::{BatchResult, SourceContent, TranslatedArtifact};
pub use cost::CostAccumulator;
pub use engine::{FieldContext, TranslationEngine};
pub use errors::{EncodingError, OrchestrationError, ProviderError, TranslationError};
pub use language::LanguageCode;
pub use orchestrator::TranslationOrchestrator;
pub use slug::generate_slug;
