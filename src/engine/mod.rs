/*!
 * Core translation engine.
 *
 * Translates one text field between two language codes while preserving
 * HTML structure, and accounts for the cost of every backend call. Owns
 * chunking, caching and prompt construction. Retry policy deliberately
 * lives in the orchestrator's batch loop, not here: a field either
 * translates completely or fails, never a corrupted partial.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::cost::{CostAccumulator, CostRecord, OperationKind};
use crate::encoding;
use crate::errors::TranslationError;
use crate::language::LanguageCode;
use crate::providers::{CompletionRequest, Provider};
use crate::store::{CacheStore, CostLedger};

pub mod chunker;
pub mod prompts;

pub use prompts::FieldContext;

/// Empirical tokens-per-word ratio for the supported languages
const TOKENS_PER_WORD: f64 = 1.3;
/// Safety margin on top of the token estimate
const TOKEN_MARGIN: f64 = 1.2;
/// Floor for the output budget, so short titles are never truncated
const MIN_OUTPUT_TOKENS: u32 = 256;

/// Translation engine for single fields and long bodies
pub struct TranslationEngine {
    /// Text-generation backend
    provider: Arc<dyn Provider>,
    /// Translation result cache
    cache: Arc<dyn CacheStore>,
    /// Cost ledger receiving one record per backend call
    ledger: Arc<dyn CostLedger>,
    /// Pipeline configuration
    config: Config,
}

impl TranslationEngine {
    /// Create an engine with an explicit backend (used by tests and
    /// embedders that construct their own provider)
    pub fn new(
        provider: Arc<dyn Provider>,
        cache: Arc<dyn CacheStore>,
        ledger: Arc<dyn CostLedger>,
        config: Config,
    ) -> Self {
        Self {
            provider,
            cache,
            ledger,
            config,
        }
    }

    /// Create an engine with the backend selected by the configuration
    pub fn from_config(
        config: Config,
        cache: Arc<dyn CacheStore>,
        ledger: Arc<dyn CostLedger>,
    ) -> Self {
        let provider = config.build_provider();
        Self::new(provider, cache, ledger, config)
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate a single text field.
    ///
    /// Checks the cache first; a hit returns immediately with zero
    /// additional cost. On a miss the backend is called once, the result is
    /// sanitized, cached and accounted. No internal retry.
    pub async fn translate_field(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
        context: FieldContext,
        costs: &mut CostAccumulator,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let key = cache_key(source, target, context, text);

        if self.config.cache.enabled {
            match self.cache.get(&key).await {
                Ok(Some(hit)) => {
                    debug!(
                        "Cache hit for {} field ({} -> {})",
                        context, source, target
                    );
                    return Ok(hit);
                }
                Ok(None) => {}
                // Cache trouble never fails a translation
                Err(e) => warn!("Cache read failed: {}", e),
            }
        }

        let words = chunker::word_count(text);
        let request = CompletionRequest::new(
            self.config.provider.model.clone(),
            prompts::build_system_prompt(source, target, context),
            prompts::build_user_prompt(text, context),
        )
        .temperature(self.config.engine.temperature)
        .max_output_tokens(output_token_budget(words));

        let response = self.provider.complete(&request).await?;

        if response.text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        let sanitized = encoding::sanitize_content(&response.text);

        if self.config.cache.enabled {
            if let Err(e) = self
                .cache
                .put(&key, &sanitized, self.config.cache.ttl_seconds)
                .await
            {
                warn!("Cache write failed: {}", e);
            }
        }

        let amount = self.config.pricing.cost_for(&response.usage);
        let record = CostRecord {
            operation: OperationKind::Translation,
            amount,
            metadata: json!({
                "provider": self.provider.name(),
                "model": self.config.provider.model,
                "source_language": source.as_str(),
                "target_language": target.as_str(),
                "context": context.as_str(),
                "prompt_tokens": response.usage.prompt_tokens,
                "completion_tokens": response.usage.completion_tokens,
            }),
        };
        if let Err(e) = self.ledger.record(&record).await {
            warn!("Cost ledger write failed: {}", e);
        }
        costs.add(record);

        debug!(
            "Translated {} field ({} -> {}), {} words, ${:.6}",
            context, source, target, words, amount
        );

        Ok(sanitized)
    }

    /// Translate a long HTML body, chunking when it exceeds the threshold.
    ///
    /// Chunks are translated sequentially with a pacing delay between
    /// calls. Any chunk failure aborts the whole field — a partially
    /// translated body is strictly worse than none.
    pub async fn translate_long_text(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
        costs: &mut CostAccumulator,
    ) -> Result<String, TranslationError> {
        let words = chunker::word_count(text);
        if words < self.config.engine.long_text_threshold_words {
            return self
                .translate_field(text, source, target, FieldContext::Body, costs)
                .await;
        }

        let chunks = chunker::split_chunks(text, self.config.engine.chunk_word_limit);
        debug!(
            "Splitting {}-word body into {} chunks ({} -> {})",
            words,
            chunks.len(),
            source,
            target
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 && self.config.engine.chunk_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.engine.chunk_delay_ms)).await;
            }

            let part = self
                .translate_field(chunk, source, target, FieldContext::Body, costs)
                .await
                .map_err(|e| TranslationError::ChunkFailed {
                    index,
                    source: Box::new(e),
                })?;
            translated.push(part);
        }

        Ok(translated.join("\n\n"))
    }
}

/// Output token budget: word count scaled by the empirical tokens-per-word
/// ratio plus a 20% margin
fn output_token_budget(words: usize) -> u32 {
    let estimate = (words as f64 * TOKENS_PER_WORD * TOKEN_MARGIN).ceil() as u32;
    estimate.max(MIN_OUTPUT_TOKENS)
}

/// Cache key from a content hash of (source, target, context, text)
fn cache_key(
    source: LanguageCode,
    target: LanguageCode,
    context: FieldContext,
    text: &str,
) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let hash: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("tr:{}:{}:{}:{}", source, target, context, hash)
}
