/*!
 * In-memory store implementation.
 *
 * Backs all three collaborator traits with parking_lot-guarded maps.
 * Used by the test suite and by embedders that do not need durability.
 */

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::content::{SeoMetadata, SourceContent, TranslatedArtifact};
use crate::cost::CostRecord;
use crate::language::LanguageCode;

use super::{CacheStore, ContentStore, CostLedger};

/// Cached value with its expiry instant
#[derive(Debug, Clone)]
struct CacheSlot {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory implementation of all collaborator traits
#[derive(Default)]
pub struct MemoryStore {
    contents: Arc<RwLock<HashMap<String, SourceContent>>>,
    artifacts: Arc<RwLock<HashMap<(String, LanguageCode), TranslatedArtifact>>>,
    cache: Arc<RwLock<HashMap<String, CacheSlot>>>,
    ledger: Arc<RwLock<Vec<CostRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cost ledger, oldest first
    pub fn ledger_records(&self) -> Vec<CostRecord> {
        self.ledger.read().clone()
    }

    /// Number of live (possibly expired) cache entries
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            contents: self.contents.clone(),
            artifacts: self.artifacts.clone(),
            cache: self.cache.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read();
        Ok(cache
            .get(key)
            .filter(|slot| slot.expires_at > Utc::now())
            .map(|slot| slot.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()> {
        let slot = CacheSlot {
            value: value.to_string(),
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        };
        self.cache.write().insert(key.to_string(), slot);
        Ok(())
    }
}

#[async_trait]
impl CostLedger for MemoryStore {
    async fn record(&self, record: &CostRecord) -> Result<()> {
        self.ledger.write().push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get_content(&self, id: &str) -> Result<Option<SourceContent>> {
        Ok(self.contents.read().get(id).cloned())
    }

    async fn upsert_content(&self, content: &SourceContent) -> Result<()> {
        self.contents
            .write()
            .insert(content.id.clone(), content.clone());
        Ok(())
    }

    async fn insert_artifact(&self, artifact: &TranslatedArtifact) -> Result<()> {
        let key = (artifact.content_id.clone(), artifact.language);
        let mut artifacts = self.artifacts.write();
        if artifacts.contains_key(&key) {
            return Err(anyhow!(
                "artifact already exists for content {} in {}",
                artifact.content_id,
                artifact.language
            ));
        }
        artifacts.insert(key, artifact.clone());
        Ok(())
    }

    async fn get_artifact(
        &self,
        content_id: &str,
        language: LanguageCode,
    ) -> Result<Option<TranslatedArtifact>> {
        let key = (content_id.to_string(), language);
        Ok(self.artifacts.read().get(&key).cloned())
    }

    async fn delete_artifact(&self, content_id: &str, language: LanguageCode) -> Result<bool> {
        let key = (content_id.to_string(), language);
        Ok(self.artifacts.write().remove(&key).is_some())
    }

    async fn list_artifact_languages(&self, content_id: &str) -> Result<Vec<LanguageCode>> {
        let artifacts = self.artifacts.read();
        let mut languages: Vec<LanguageCode> = artifacts
            .keys()
            .filter(|(id, _)| id == content_id)
            .map(|(_, lang)| *lang)
            .collect();
        // Canonical order keeps read-side results deterministic
        languages.sort_by_key(|l| {
            LanguageCode::all()
                .iter()
                .position(|c| c == l)
                .unwrap_or(usize::MAX)
        });
        Ok(languages)
    }

    async fn update_artifact_seo(&self, artifact_id: &str, seo: &SeoMetadata) -> Result<()> {
        let mut artifacts = self.artifacts.write();
        for artifact in artifacts.values_mut() {
            if artifact.id == artifact_id {
                artifact.seo = Some(seo.clone());
                return Ok(());
            }
        }
        Err(anyhow!("artifact not found: {}", artifact_id))
    }
}
