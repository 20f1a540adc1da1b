/*!
 * Pipeline configuration.
 *
 * This module handles loading and validating configuration for the
 * translation pipeline: backend provider selection, engine tuning, cache
 * policy, batch pacing and pricing.
 */

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cost::ModelPricing;
use crate::providers::{AnthropicProvider, OpenAiProvider, Provider};

/// Backend provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI or any OpenAI-compatible endpoint
    #[default]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Backend provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Which backend to use
    #[serde(default)]
    pub kind: ProviderKind,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL; empty means the provider's public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
        }
    }
}

/// Engine tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Sampling temperature; low because translation should be close to
    /// deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Bodies with at least this many words are chunked
    #[serde(default = "default_long_text_threshold")]
    pub long_text_threshold_words: usize,

    /// Word ceiling per chunk, counted with tags stripped
    #[serde(default = "default_chunk_word_limit")]
    pub chunk_word_limit: usize,

    /// Pacing delay between chunk calls, milliseconds
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            long_text_threshold_words: default_long_text_threshold(),
            chunk_word_limit: default_chunk_word_limit(),
            chunk_delay_ms: default_chunk_delay_ms(),
        }
    }
}

/// Cache policy
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Whether the translation cache is consulted at all
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Entry time-to-live in seconds (default 30 days)
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

/// Batch pacing and retry policy
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Pacing delay between languages, milliseconds
    #[serde(default = "default_language_delay_ms")]
    pub language_delay_ms: u64,

    /// Retries for retryable (rate-limit) failures per language
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff between retries, milliseconds (scaled by attempt)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            language_delay_ms: default_language_delay_ms(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Backend provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Cache policy
    #[serde(default)]
    pub cache: CacheConfig,

    /// Batch pacing and retries
    #[serde(default)]
    pub batch: BatchConfig,

    /// Model pricing for cost accounting
    #[serde(default)]
    pub pricing: ModelPricing,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file: {}", e))?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("provider.model must not be empty"));
        }
        if !self.provider.endpoint.is_empty() {
            Url::parse(&self.provider.endpoint)
                .map_err(|e| anyhow!("provider.endpoint is not a valid URL: {}", e))?;
        }
        if !(0.0..=2.0).contains(&self.engine.temperature) {
            return Err(anyhow!("engine.temperature must be between 0.0 and 2.0"));
        }
        if self.engine.chunk_word_limit == 0 {
            return Err(anyhow!("engine.chunk_word_limit must be positive"));
        }
        if self.engine.long_text_threshold_words < self.engine.chunk_word_limit {
            return Err(anyhow!(
                "engine.long_text_threshold_words must be at least engine.chunk_word_limit"
            ));
        }
        if self.cache.ttl_seconds <= 0 {
            return Err(anyhow!("cache.ttl_seconds must be positive"));
        }
        Ok(())
    }

    /// Construct the backend client selected by this configuration
    pub fn build_provider(&self) -> Arc<dyn Provider> {
        match self.provider.kind {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                self.provider.api_key.clone(),
                self.provider.endpoint.clone(),
            )),
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
                self.provider.api_key.clone(),
                self.provider.endpoint.clone(),
            )),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_long_text_threshold() -> usize {
    2000
}

fn default_chunk_word_limit() -> usize {
    1500
}

fn default_chunk_delay_ms() -> u64 {
    500
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_seconds() -> i64 {
    30 * 24 * 60 * 60
}

fn default_language_delay_ms() -> u64 {
    1000
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    2000
}
