/*!
 * SQLite-backed store implementation.
 *
 * A single database backs all three collaborator traits. Connection access
 * is serialized behind a mutex and moved onto the blocking thread pool, so
 * async callers never block a runtime worker on SQLite I/O. Schema setup is
 * versioned for future migrations.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::content::{ArtifactStatus, SeoMetadata, SourceContent, TranslatedArtifact};
use crate::cost::CostRecord;
use crate::language::LanguageCode;

use super::{CacheStore, ContentStore, CostLedger};

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "polypress.db";

/// Default database directory name under the user's data directory
const DEFAULT_DB_DIRNAME: &str = "polypress";

/// SQLite store implementing content, cache and ledger surfaces
#[derive(Clone)]
pub struct SqliteStore {
    /// Path to the database file
    db_path: PathBuf,
    /// Serialized connection, shared across clones
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a store at the default location
    pub fn new_default() -> Result<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Open (or create) a store at the given path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// The default database path under the user's data directory
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Path this store was opened at
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run a closure against the connection on the blocking thread pool
    async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connection.lock();
            f(&conn)
        })
        .await
        .context("Database task panicked")?
    }

    /// Remove expired cache rows; returns the number deleted
    pub async fn purge_expired_cache(&self) -> Result<usize> {
        self.execute_async(|conn| {
            let deleted = conn.execute(
                "DELETE FROM translation_cache WHERE expires_at <= ?1",
                params![Utc::now().to_rfc3339()],
            )?;
            Ok(deleted)
        })
        .await
    }
}

/// Initialize the database schema
fn initialize_schema(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS source_contents (
            id TEXT PRIMARY KEY,
            source_language TEXT NOT NULL,
            title TEXT NOT NULL,
            excerpt TEXT NOT NULL,
            body_html TEXT NOT NULL,
            image_alt TEXT,
            faqs TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS artifacts (
            id TEXT PRIMARY KEY,
            content_id TEXT NOT NULL,
            language TEXT NOT NULL,
            title TEXT NOT NULL,
            slug TEXT NOT NULL,
            excerpt TEXT NOT NULL,
            body_html TEXT NOT NULL,
            image_alt TEXT,
            faqs TEXT NOT NULL,
            status TEXT NOT NULL,
            cost REAL NOT NULL,
            seo TEXT,
            created_at TEXT NOT NULL,
            UNIQUE (content_id, language)
        );

        CREATE TABLE IF NOT EXISTS translation_cache (
            cache_key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            expires_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cost_ledger (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            operation TEXT NOT NULL,
            amount REAL NOT NULL,
            metadata TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_artifacts_content ON artifacts (content_id);
        "#,
    )
    .context("Failed to create database tables")?;

    Ok(())
}

/// Map a database row to a `TranslatedArtifact`
fn artifact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawArtifact> {
    Ok(RawArtifact {
        id: row.get(0)?,
        content_id: row.get(1)?,
        language: row.get(2)?,
        title: row.get(3)?,
        slug: row.get(4)?,
        excerpt: row.get(5)?,
        body_html: row.get(6)?,
        image_alt: row.get(7)?,
        faqs: row.get(8)?,
        status: row.get(9)?,
        cost: row.get(10)?,
        seo: row.get(11)?,
        created_at: row.get(12)?,
    })
}

/// Row image before JSON/enum decoding
struct RawArtifact {
    id: String,
    content_id: String,
    language: String,
    title: String,
    slug: String,
    excerpt: String,
    body_html: String,
    image_alt: Option<String>,
    faqs: String,
    status: String,
    cost: f64,
    seo: Option<String>,
    created_at: String,
}

impl RawArtifact {
    fn decode(self) -> Result<TranslatedArtifact> {
        Ok(TranslatedArtifact {
            id: self.id,
            content_id: self.content_id,
            language: self.language.parse::<LanguageCode>()?,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            body_html: self.body_html,
            image_alt: self.image_alt,
            faqs: serde_json::from_str(&self.faqs).context("Failed to decode artifact FAQs")?,
            status: self.status.parse::<ArtifactStatus>()?,
            cost: self.cost,
            seo: self
                .seo
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .context("Failed to decode artifact SEO metadata")?,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute_async(move |conn| {
            let value: Option<String> = conn
                .query_row(
                    "SELECT value FROM translation_cache WHERE cache_key = ?1 AND expires_at > ?2",
                    params![key, Utc::now().to_rfc3339()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.execute_async(move |conn| {
            let expires_at = (Utc::now() + Duration::seconds(ttl_seconds)).to_rfc3339();
            conn.execute(
                r#"
                INSERT INTO translation_cache (cache_key, value, expires_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT (cache_key) DO UPDATE SET value = ?2, expires_at = ?3
                "#,
                params![key, value, expires_at],
            )?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CostLedger for SqliteStore {
    async fn record(&self, record: &CostRecord) -> Result<()> {
        let record = record.clone();
        self.execute_async(move |conn| {
            conn.execute(
                r#"
                INSERT INTO cost_ledger (operation, amount, metadata, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    record.operation.to_string(),
                    record.amount,
                    record.metadata.to_string(),
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn get_content(&self, id: &str) -> Result<Option<SourceContent>> {
        let id = id.to_string();
        self.execute_async(move |conn| {
            let row: Option<(String, String, String, String, String, Option<String>, String)> =
                conn.query_row(
                    r#"
                    SELECT id, source_language, title, excerpt, body_html, image_alt, faqs
                    FROM source_contents WHERE id = ?1
                    "#,
                    params![id],
                    |row| {
                        Ok((
                            row.get(0)?,
                            row.get(1)?,
                            row.get(2)?,
                            row.get(3)?,
                            row.get(4)?,
                            row.get(5)?,
                            row.get(6)?,
                        ))
                    },
                )
                .optional()?;

            row.map(|(id, source_language, title, excerpt, body_html, image_alt, faqs)| {
                Ok(SourceContent {
                    id,
                    source_language: source_language.parse::<LanguageCode>()?,
                    title,
                    excerpt,
                    body_html,
                    image_alt,
                    faqs: serde_json::from_str(&faqs).context("Failed to decode content FAQs")?,
                })
            })
            .transpose()
        })
        .await
    }

    async fn upsert_content(&self, content: &SourceContent) -> Result<()> {
        let content = content.clone();
        self.execute_async(move |conn| {
            conn.execute(
                r#"
                INSERT INTO source_contents (id, source_language, title, excerpt, body_html, image_alt, faqs)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT (id) DO UPDATE SET
                    source_language = ?2, title = ?3, excerpt = ?4,
                    body_html = ?5, image_alt = ?6, faqs = ?7
                "#,
                params![
                    content.id,
                    content.source_language.as_str(),
                    content.title,
                    content.excerpt,
                    content.body_html,
                    content.image_alt,
                    serde_json::to_string(&content.faqs)?,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn insert_artifact(&self, artifact: &TranslatedArtifact) -> Result<()> {
        let artifact = artifact.clone();
        self.execute_async(move |conn| {
            let result = conn.execute(
                r#"
                INSERT INTO artifacts (
                    id, content_id, language, title, slug, excerpt, body_html,
                    image_alt, faqs, status, cost, seo, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
                params![
                    artifact.id,
                    artifact.content_id,
                    artifact.language.as_str(),
                    artifact.title,
                    artifact.slug,
                    artifact.excerpt,
                    artifact.body_html,
                    artifact.image_alt,
                    serde_json::to_string(&artifact.faqs)?,
                    artifact.status.to_string(),
                    artifact.cost,
                    artifact
                        .seo
                        .as_ref()
                        .map(serde_json::to_string)
                        .transpose()?,
                    artifact.created_at,
                ],
            );

            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(anyhow!(
                        "artifact already exists for content {} in {}",
                        artifact.content_id,
                        artifact.language
                    ))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn get_artifact(
        &self,
        content_id: &str,
        language: LanguageCode,
    ) -> Result<Option<TranslatedArtifact>> {
        let content_id = content_id.to_string();
        self.execute_async(move |conn| {
            let raw = conn
                .query_row(
                    r#"
                    SELECT id, content_id, language, title, slug, excerpt, body_html,
                           image_alt, faqs, status, cost, seo, created_at
                    FROM artifacts WHERE content_id = ?1 AND language = ?2
                    "#,
                    params![content_id, language.as_str()],
                    artifact_from_row,
                )
                .optional()?;
            raw.map(RawArtifact::decode).transpose()
        })
        .await
    }

    async fn delete_artifact(&self, content_id: &str, language: LanguageCode) -> Result<bool> {
        let content_id = content_id.to_string();
        self.execute_async(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM artifacts WHERE content_id = ?1 AND language = ?2",
                params![content_id, language.as_str()],
            )?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_artifact_languages(&self, content_id: &str) -> Result<Vec<LanguageCode>> {
        let content_id = content_id.to_string();
        self.execute_async(move |conn| {
            let mut stmt =
                conn.prepare("SELECT language FROM artifacts WHERE content_id = ?1")?;
            let codes = stmt
                .query_map(params![content_id], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;

            let mut languages = codes
                .iter()
                .map(|c| c.parse::<LanguageCode>().map_err(Into::into))
                .collect::<Result<Vec<LanguageCode>>>()?;
            languages.sort_by_key(|l| {
                LanguageCode::all()
                    .iter()
                    .position(|c| c == l)
                    .unwrap_or(usize::MAX)
            });
            Ok(languages)
        })
        .await
    }

    async fn update_artifact_seo(&self, artifact_id: &str, seo: &SeoMetadata) -> Result<()> {
        let artifact_id = artifact_id.to_string();
        let seo = serde_json::to_string(seo)?;
        self.execute_async(move |conn| {
            let updated = conn.execute(
                "UPDATE artifacts SET seo = ?1 WHERE id = ?2",
                params![seo, artifact_id],
            )?;
            if updated == 0 {
                return Err(anyhow!("artifact not found: {}", artifact_id));
            }
            Ok(())
        })
        .await
    }
}
