/*!
 * Translation orchestration across target languages.
 *
 * Coordinates translating one source content item into one or many target
 * languages with per-language fault isolation. Languages run as a
 * sequential loop rather than parallel tasks: this bounds burst load on
 * the rate-limited backend and keeps cost accounting and partial-failure
 * bookkeeping race-free. Each completed language is independently durable;
 * aborting a batch never leaves a single language half-translated.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::config::BatchConfig;
use crate::content::{
    ArtifactStatus, BatchResult, FaqPair, SeoMetadata, SourceContent, TranslatedArtifact,
    TranslationStats,
};
use crate::cost::CostAccumulator;
use crate::engine::{FieldContext, TranslationEngine};
use crate::errors::OrchestrationError;
use crate::language::LanguageCode;
use crate::slug::generate_slug;
use crate::store::ContentStore;

/// Collaborator supplying SEO metadata for a finished artifact.
///
/// Implemented elsewhere; enrichment failures are logged and never fail
/// the translation itself.
#[async_trait]
pub trait SeoEnricher: Send + Sync {
    /// Produce SEO metadata for a freshly translated artifact
    async fn enrich(&self, artifact: &TranslatedArtifact) -> anyhow::Result<SeoMetadata>;
}

/// Orchestrator for single- and multi-language translation of content items
pub struct TranslationOrchestrator {
    /// The translation engine
    engine: TranslationEngine,
    /// Content store for reads and artifact persistence
    store: Arc<dyn ContentStore>,
    /// Optional SEO enrichment collaborator
    seo: Option<Arc<dyn SeoEnricher>>,
    /// Batch pacing and retry policy
    batch: BatchConfig,
}

impl TranslationOrchestrator {
    /// Create an orchestrator
    pub fn new(engine: TranslationEngine, store: Arc<dyn ContentStore>) -> Self {
        let batch = engine.config().batch.clone();
        Self {
            engine,
            store,
            seo: None,
            batch,
        }
    }

    /// Attach an SEO enrichment collaborator
    pub fn with_seo_enricher(mut self, seo: Arc<dyn SeoEnricher>) -> Self {
        self.seo = Some(seo);
        self
    }

    /// Load a source content item by id, for id-driven batch jobs
    pub async fn load_content(&self, content_id: &str) -> Result<SourceContent, OrchestrationError> {
        self.store
            .get_content(content_id)
            .await
            .map_err(|e| OrchestrationError::Store(e.to_string()))?
            .ok_or_else(|| OrchestrationError::ContentNotFound(content_id.to_string()))
    }

    /// Translate one content item into one target language.
    ///
    /// Fails fast if the target equals the source language or an artifact
    /// already exists for the pair. On success the artifact is persisted
    /// with `status=active` and the accumulated cost.
    pub async fn translate_one(
        &self,
        content: &SourceContent,
        target: LanguageCode,
    ) -> Result<TranslatedArtifact, OrchestrationError> {
        if target == content.source_language {
            return Err(OrchestrationError::SameAsSource(target));
        }

        let existing = self
            .store
            .get_artifact(&content.id, target)
            .await
            .map_err(|e| OrchestrationError::Store(e.to_string()))?;
        if existing.is_some() {
            return Err(OrchestrationError::DuplicateTranslation {
                content_id: content.id.clone(),
                language: target,
            });
        }

        let source = content.source_language;
        let mut costs = CostAccumulator::new();

        let title = self
            .engine
            .translate_field(&content.title, source, target, FieldContext::Title, &mut costs)
            .await?;

        let excerpt = self
            .engine
            .translate_field(
                &content.excerpt,
                source,
                target,
                FieldContext::Excerpt,
                &mut costs,
            )
            .await?;

        let body_html = self
            .engine
            .translate_long_text(&content.body_html, source, target, &mut costs)
            .await?;

        let image_alt = match &content.image_alt {
            Some(alt) => Some(
                self.engine
                    .translate_field(alt, source, target, FieldContext::AltText, &mut costs)
                    .await?,
            ),
            None => None,
        };

        // FAQ entries keep their original order
        let mut faqs = Vec::with_capacity(content.faqs.len());
        for faq in &content.faqs {
            let question = self
                .engine
                .translate_field(
                    &faq.question,
                    source,
                    target,
                    FieldContext::FaqQuestion,
                    &mut costs,
                )
                .await?;
            let answer = self
                .engine
                .translate_field(
                    &faq.answer,
                    source,
                    target,
                    FieldContext::FaqAnswer,
                    &mut costs,
                )
                .await?;
            faqs.push(FaqPair { question, answer });
        }

        let slug = generate_slug(&title, target);

        let mut artifact = TranslatedArtifact {
            id: Uuid::new_v4().to_string(),
            content_id: content.id.clone(),
            language: target,
            title,
            slug,
            excerpt,
            body_html,
            image_alt,
            faqs,
            status: ArtifactStatus::Active,
            cost: costs.total(),
            seo: None,
            created_at: Utc::now().to_rfc3339(),
        };

        self.store
            .insert_artifact(&artifact)
            .await
            .map_err(|e| OrchestrationError::Store(e.to_string()))?;

        info!(
            "Translated content {} into {} ({} calls, ${:.4})",
            content.id,
            target,
            costs.len(),
            costs.total()
        );

        self.enrich_seo(&mut artifact).await;

        Ok(artifact)
    }

    /// SEO enrichment is best-effort: failures are logged, never fatal
    async fn enrich_seo(&self, artifact: &mut TranslatedArtifact) {
        let Some(enricher) = &self.seo else {
            return;
        };

        match enricher.enrich(artifact).await {
            Ok(seo) => {
                if let Err(e) = self.store.update_artifact_seo(&artifact.id, &seo).await {
                    warn!("Failed to persist SEO metadata for {}: {}", artifact.id, e);
                } else {
                    artifact.seo = Some(seo);
                }
            }
            Err(e) => warn!("SEO enrichment failed for {}: {}", artifact.id, e),
        }
    }

    /// Translate into every requested language, isolating failures.
    ///
    /// Target set is the explicit list in its given order, or the canonical
    /// supported set minus the source language. When `skip_existing` is
    /// set, languages with an existing artifact are recorded as skipped
    /// without any engine call, so repeated batches never duplicate work.
    ///
    /// `total_cost` in the result covers committed artifacts only. A
    /// language that fails partway still spent money on its completed
    /// chunks; that spend is visible in the store's cost ledger, not here.
    pub async fn translate_to_all_languages(
        &self,
        content: &SourceContent,
        languages: Option<Vec<LanguageCode>>,
        skip_existing: bool,
    ) -> Result<BatchResult, OrchestrationError> {
        let targets = self.resolve_targets(content, languages);
        let mut result = BatchResult::default();
        let mut processed_any = false;

        for target in targets {
            if skip_existing {
                let exists = self
                    .store
                    .get_artifact(&content.id, target)
                    .await
                    .map_err(|e| OrchestrationError::Store(e.to_string()))?
                    .is_some();
                if exists {
                    result.skipped.push(target);
                    continue;
                }
            }

            // Pacing between languages, once the engine has actually run
            if processed_any && self.batch.language_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.batch.language_delay_ms)).await;
            }
            processed_any = true;

            match self.attempt_language(content, target).await {
                Ok(artifact) => {
                    result.total_cost += artifact.cost;
                    result.succeeded.push(target);
                }
                Err(e) => {
                    warn!(
                        "Translation of content {} into {} failed: {}",
                        content.id, target, e
                    );
                    result.failed.push((target, e.to_string()));
                }
            }
        }

        info!("Batch for content {}: {}", content.id, result.summary());
        Ok(result)
    }

    /// Delete any existing artifacts and translate the given languages
    /// afresh. Used after source-content edits.
    pub async fn retranslate(
        &self,
        content: &SourceContent,
        languages: &[LanguageCode],
    ) -> Result<BatchResult, OrchestrationError> {
        for &language in languages {
            let deleted = self
                .store
                .delete_artifact(&content.id, language)
                .await
                .map_err(|e| OrchestrationError::Store(e.to_string()))?;
            if deleted {
                info!(
                    "Deleted existing {} artifact of content {} for retranslation",
                    language, content.id
                );
            }
        }

        self.translate_to_all_languages(content, Some(languages.to_vec()), false)
            .await
    }

    /// One language attempt with batch-level retries for retryable
    /// (backpressure) failures
    async fn attempt_language(
        &self,
        content: &SourceContent,
        target: LanguageCode,
    ) -> Result<TranslatedArtifact, OrchestrationError> {
        let mut attempt = 0;
        loop {
            match self.translate_one(content, target).await {
                Err(OrchestrationError::Translation(e))
                    if e.is_retryable() && attempt < self.batch.retry_count =>
                {
                    attempt += 1;
                    let backoff = self.batch.retry_backoff_ms * attempt as u64;
                    warn!(
                        "Backend backpressure translating {} into {}, retry {}/{} in {}ms",
                        content.id, target, attempt, self.batch.retry_count, backoff
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                other => return other,
            }
        }
    }

    fn resolve_targets(
        &self,
        content: &SourceContent,
        languages: Option<Vec<LanguageCode>>,
    ) -> Vec<LanguageCode> {
        match languages {
            Some(list) => list,
            None => LanguageCode::all()
                .iter()
                .copied()
                .filter(|l| *l != content.source_language)
                .collect(),
        }
    }

    /// Languages that have no artifact yet (source excluded)
    pub async fn get_missing_languages(
        &self,
        content: &SourceContent,
    ) -> Result<Vec<LanguageCode>, OrchestrationError> {
        let existing = self
            .store
            .list_artifact_languages(&content.id)
            .await
            .map_err(|e| OrchestrationError::Store(e.to_string()))?;

        Ok(LanguageCode::all()
            .iter()
            .copied()
            .filter(|l| *l != content.source_language && !existing.contains(l))
            .collect())
    }

    /// Whether every supported target language has an artifact
    pub async fn is_fully_translated(
        &self,
        content: &SourceContent,
    ) -> Result<bool, OrchestrationError> {
        Ok(self.get_missing_languages(content).await?.is_empty())
    }

    /// Read-side coverage summary for one content item
    pub async fn get_translation_stats(
        &self,
        content: &SourceContent,
    ) -> Result<TranslationStats, OrchestrationError> {
        let translated = self
            .store
            .list_artifact_languages(&content.id)
            .await
            .map_err(|e| OrchestrationError::Store(e.to_string()))?;
        let missing = self.get_missing_languages(content).await?;

        Ok(TranslationStats {
            total_targets: LanguageCode::all().len() - 1,
            translated,
            missing,
        })
    }
}
