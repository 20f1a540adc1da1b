/*!
 * External collaborator surfaces: content store, cache store, cost ledger.
 *
 * The pipeline consumes these as traits so batch jobs can wire in whatever
 * persistence they run against. `SqliteStore` implements all three on a
 * single SQLite database; `MemoryStore` is the in-process equivalent used
 * by tests and lightweight embedders.
 */

use anyhow::Result;
use async_trait::async_trait;

use crate::content::{SeoMetadata, SourceContent, TranslatedArtifact};
use crate::cost::CostRecord;
use crate::language::LanguageCode;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key-value cache for translation results.
///
/// Purely an optimization: absence never changes pipeline output, only cost
/// and latency. Writes are idempotent (same key, same value), so the store
/// needs no locking beyond single-key write atomicity.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached value; expired entries read as absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value with a time-to-live in seconds
    async fn put(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()>;
}

/// Append-only ledger of billable operations
#[async_trait]
pub trait CostLedger: Send + Sync {
    /// Append one cost record; records are never mutated afterwards
    async fn record(&self, record: &CostRecord) -> Result<()>;
}

/// Storage for source content and translated artifacts.
///
/// Enforces the invariant that at most one non-deleted artifact exists per
/// (content, language) pair: `insert_artifact` fails on a duplicate.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch a source content item by id
    async fn get_content(&self, id: &str) -> Result<Option<SourceContent>>;

    /// Create or replace a source content item
    async fn upsert_content(&self, content: &SourceContent) -> Result<()>;

    /// Persist a new artifact; fails if one exists for the same
    /// (content, language) pair
    async fn insert_artifact(&self, artifact: &TranslatedArtifact) -> Result<()>;

    /// Fetch the artifact for a (content, language) pair, if any
    async fn get_artifact(
        &self,
        content_id: &str,
        language: LanguageCode,
    ) -> Result<Option<TranslatedArtifact>>;

    /// Delete the artifact for a (content, language) pair.
    /// Returns whether anything was deleted.
    async fn delete_artifact(&self, content_id: &str, language: LanguageCode) -> Result<bool>;

    /// Languages for which an artifact currently exists
    async fn list_artifact_languages(&self, content_id: &str) -> Result<Vec<LanguageCode>>;

    /// Attach or replace SEO metadata on an existing artifact.
    /// This is the only post-activation mutation; content fields stay frozen.
    async fn update_artifact_seo(&self, artifact_id: &str, seo: &SeoMetadata) -> Result<()>;
}
