/*!
 * Tests for the store implementations: cache semantics, ledger appends and
 * the one-artifact-per-(content, language) invariant, exercised against
 * both the in-memory and the SQLite store
 */

use std::sync::Arc;

use polypress::content::{ArtifactStatus, SeoMetadata, TranslatedArtifact};
use polypress::cost::{CostRecord, OperationKind};
use polypress::language::LanguageCode;
use polypress::store::{CacheStore, ContentStore, CostLedger, MemoryStore, SqliteStore};
use serde_json::json;

use crate::common::sample_content;

fn sample_artifact(content_id: &str, language: LanguageCode) -> TranslatedArtifact {
    TranslatedArtifact {
        id: uuid::Uuid::new_v4().to_string(),
        content_id: content_id.to_string(),
        language,
        title: "Titel".to_string(),
        slug: "titel".to_string(),
        excerpt: "Auszug".to_string(),
        body_html: "<p>Inhalt</p>".to_string(),
        image_alt: Some("Teamfoto".to_string()),
        faqs: vec![],
        status: ArtifactStatus::Active,
        cost: 0.0123,
        seo: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn stores() -> Vec<(&'static str, Arc<dyn ContentStore>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new()) as Arc<dyn ContentStore>),
        (
            "sqlite",
            Arc::new(SqliteStore::new_in_memory().unwrap()) as Arc<dyn ContentStore>,
        ),
    ]
}

#[tokio::test]
async fn test_contentStore_withUpsert_shouldRoundTripContent() {
    for (name, store) in stores() {
        let content = sample_content();
        store.upsert_content(&content).await.unwrap();

        let loaded = store.get_content("content-1").await.unwrap().unwrap();
        assert_eq!(loaded.title, content.title, "store: {}", name);
        assert_eq!(loaded.source_language, LanguageCode::En, "store: {}", name);
        assert_eq!(loaded.faqs.len(), 2, "store: {}", name);

        assert!(store.get_content("missing").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_contentStore_withUpsertTwice_shouldReplaceContent() {
    for (name, store) in stores() {
        let mut content = sample_content();
        store.upsert_content(&content).await.unwrap();

        content.title = "Revised title".to_string();
        store.upsert_content(&content).await.unwrap();

        let loaded = store.get_content("content-1").await.unwrap().unwrap();
        assert_eq!(loaded.title, "Revised title", "store: {}", name);
    }
}

#[tokio::test]
async fn test_insertArtifact_withDuplicatePair_shouldFail() {
    for (name, store) in stores() {
        let first = sample_artifact("content-1", LanguageCode::De);
        store.insert_artifact(&first).await.unwrap();

        // Different artifact id, same (content, language) pair
        let duplicate = sample_artifact("content-1", LanguageCode::De);
        let err = store.insert_artifact(&duplicate).await.unwrap_err();
        assert!(
            err.to_string().contains("already exists"),
            "store: {}, error: {}",
            name,
            err
        );

        // A different language for the same content is fine
        let other = sample_artifact("content-1", LanguageCode::Fr);
        store.insert_artifact(&other).await.unwrap();
    }
}

#[tokio::test]
async fn test_getArtifact_withStoredArtifact_shouldRoundTripAllFields() {
    for (name, store) in stores() {
        let mut artifact = sample_artifact("content-1", LanguageCode::Ru);
        artifact.faqs = vec![polypress::content::FaqPair {
            question: "Вопрос?".to_string(),
            answer: "Ответ.".to_string(),
        }];
        store.insert_artifact(&artifact).await.unwrap();

        let loaded = store
            .get_artifact("content-1", LanguageCode::Ru)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, artifact.id, "store: {}", name);
        assert_eq!(loaded.language, LanguageCode::Ru);
        assert_eq!(loaded.status, ArtifactStatus::Active);
        assert_eq!(loaded.faqs, artifact.faqs);
        assert_eq!(loaded.image_alt, artifact.image_alt);
        assert!((loaded.cost - 0.0123).abs() < 1e-9);

        assert!(store
            .get_artifact("content-1", LanguageCode::Zh)
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn test_deleteArtifact_thenReinsert_shouldSucceed() {
    for (name, store) in stores() {
        let artifact = sample_artifact("content-1", LanguageCode::De);
        store.insert_artifact(&artifact).await.unwrap();

        assert!(
            store
                .delete_artifact("content-1", LanguageCode::De)
                .await
                .unwrap(),
            "store: {}",
            name
        );
        // Deleting again reports nothing deleted
        assert!(!store
            .delete_artifact("content-1", LanguageCode::De)
            .await
            .unwrap());

        // The pair is free again after deletion
        let replacement = sample_artifact("content-1", LanguageCode::De);
        store.insert_artifact(&replacement).await.unwrap();
    }
}

#[tokio::test]
async fn test_listArtifactLanguages_withSeveralArtifacts_shouldSortCanonically() {
    for (name, store) in stores() {
        // Inserted out of canonical order on purpose
        for language in [LanguageCode::Hi, LanguageCode::De, LanguageCode::Ar] {
            store
                .insert_artifact(&sample_artifact("content-1", language))
                .await
                .unwrap();
        }
        store
            .insert_artifact(&sample_artifact("content-2", LanguageCode::Fr))
            .await
            .unwrap();

        let languages = store.list_artifact_languages("content-1").await.unwrap();
        assert_eq!(
            languages,
            vec![LanguageCode::De, LanguageCode::Ar, LanguageCode::Hi],
            "store: {}",
            name
        );
        assert!(store
            .list_artifact_languages("content-3")
            .await
            .unwrap()
            .is_empty());
    }
}

#[tokio::test]
async fn test_updateArtifactSeo_withExistingArtifact_shouldPersist() {
    for (name, store) in stores() {
        let artifact = sample_artifact("content-1", LanguageCode::Es);
        store.insert_artifact(&artifact).await.unwrap();

        let seo = SeoMetadata {
            meta_title: "Titel".to_string(),
            meta_description: "Kurze Beschreibung.".to_string(),
            canonical_url: "https://example.com/es/titel".to_string(),
        };
        store.update_artifact_seo(&artifact.id, &seo).await.unwrap();

        let loaded = store
            .get_artifact("content-1", LanguageCode::Es)
            .await
            .unwrap()
            .unwrap();
        let loaded_seo = loaded.seo.expect("SEO should be stored");
        assert_eq!(loaded_seo.canonical_url, seo.canonical_url, "store: {}", name);

        let err = store.update_artifact_seo("no-such-id", &seo).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

#[tokio::test]
async fn test_cacheStore_withFreshEntry_shouldReturnValue() {
    let stores: Vec<(&str, Arc<dyn CacheStore>)> = vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::new_in_memory().unwrap())),
    ];

    for (name, cache) in stores {
        assert!(cache.get("tr:key").await.unwrap().is_none());

        cache.put("tr:key", "valeur", 3600).await.unwrap();
        assert_eq!(
            cache.get("tr:key").await.unwrap().as_deref(),
            Some("valeur"),
            "store: {}",
            name
        );

        // Overwriting the same key replaces the value
        cache.put("tr:key", "nouvelle valeur", 3600).await.unwrap();
        assert_eq!(
            cache.get("tr:key").await.unwrap().as_deref(),
            Some("nouvelle valeur")
        );
    }
}

#[tokio::test]
async fn test_cacheStore_withExpiredEntry_shouldReadAsAbsent() {
    let stores: Vec<(&str, Arc<dyn CacheStore>)> = vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::new_in_memory().unwrap())),
    ];

    for (name, cache) in stores {
        // Already expired at write time
        cache.put("tr:stale", "old", -1).await.unwrap();
        assert!(
            cache.get("tr:stale").await.unwrap().is_none(),
            "store: {}",
            name
        );
    }
}

#[tokio::test]
async fn test_purgeExpiredCache_withMixedEntries_shouldDeleteOnlyExpired() {
    let store = SqliteStore::new_in_memory().unwrap();

    store.put("tr:live", "value", 3600).await.unwrap();
    store.put("tr:dead-1", "value", -1).await.unwrap();
    store.put("tr:dead-2", "value", -1).await.unwrap();

    let deleted = store.purge_expired_cache().await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(store.get("tr:live").await.unwrap().as_deref(), Some("value"));
}

#[tokio::test]
async fn test_costLedger_withRecords_shouldAppendInOrder() {
    let store = MemoryStore::new();

    for i in 0..3 {
        let record = CostRecord {
            operation: OperationKind::Translation,
            amount: 0.001 * (i + 1) as f64,
            metadata: json!({ "call": i }),
        };
        store.record(&record).await.unwrap();
    }

    let records = store.ledger_records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].metadata["call"], 0);
    assert_eq!(records[2].metadata["call"], 2);
    assert!(records[2].amount > records[0].amount);
}

#[tokio::test]
async fn test_sqliteLedger_withRecord_shouldAcceptAppend() {
    let store = SqliteStore::new_in_memory().unwrap();

    let record = CostRecord {
        operation: OperationKind::Translation,
        amount: 0.0042,
        metadata: json!({ "model": "gpt-4o-mini", "target_language": "de" }),
    };
    store.record(&record).await.unwrap();
}

#[tokio::test]
async fn test_sqliteStore_onDisk_shouldPersistAcrossReopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("polypress.db");

    {
        let store = SqliteStore::new(&db_path).unwrap();
        store
            .insert_artifact(&sample_artifact("content-1", LanguageCode::De))
            .await
            .unwrap();
    }

    let reopened = SqliteStore::new(&db_path).unwrap();
    assert_eq!(reopened.path(), db_path.as_path());
    let loaded = reopened
        .get_artifact("content-1", LanguageCode::De)
        .await
        .unwrap();
    assert!(loaded.is_some());
}
