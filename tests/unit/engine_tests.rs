/*!
 * Tests for the translation engine: caching, budgets, chunked bodies and
 * failure semantics
 */

use std::sync::Arc;

use polypress::cost::CostAccumulator;
use polypress::engine::FieldContext;
use polypress::errors::TranslationError;
use polypress::language::LanguageCode;
use polypress::providers::MockProvider;
use polypress::store::MemoryStore;

use crate::common::{engine_with, html_body};

#[tokio::test]
async fn test_translateField_withWorkingBackend_shouldReturnSanitizedText() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    let out = engine
        .translate_field(
            "Company News",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap();

    assert_eq!(out, "[translated] Company News");
    assert_eq!(provider.request_count(), 1);
    assert_eq!(costs.len(), 1);
    assert!(costs.total() > 0.0);
}

#[tokio::test]
async fn test_translateField_withEmptyInput_shouldSkipBackend() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    let out = engine
        .translate_field(
            "   ",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap();

    assert_eq!(out, "");
    assert_eq!(provider.request_count(), 0);
    assert!(costs.is_empty());
}

#[tokio::test]
async fn test_translateField_withCacheHit_shouldCostNothing() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    let first = engine
        .translate_field(
            "Cached title",
            LanguageCode::En,
            LanguageCode::Fr,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap();
    assert_eq!(costs.len(), 1);

    let mut second_costs = CostAccumulator::new();
    let second = engine
        .translate_field(
            "Cached title",
            LanguageCode::En,
            LanguageCode::Fr,
            FieldContext::Title,
            &mut second_costs,
        )
        .await
        .unwrap();

    assert_eq!(first, second);
    // No second backend call, no additional cost
    assert_eq!(provider.request_count(), 1);
    assert!(second_costs.is_empty());
}

#[tokio::test]
async fn test_translateField_withDifferentContexts_shouldNotShareCache() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    for context in [FieldContext::Title, FieldContext::Excerpt] {
        engine
            .translate_field(
                "Same text",
                LanguageCode::En,
                LanguageCode::Es,
                context,
                &mut costs,
            )
            .await
            .unwrap();
    }

    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translateField_withBackendFailure_shouldNotRetryInternally() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::failing());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    let err = engine
        .translate_field(
            "Doomed",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::Backend(_)));
    assert_eq!(provider.request_count(), 1);
    assert!(costs.is_empty());
}

#[tokio::test]
async fn test_translateField_withEmptyCompletion_shouldFail() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::empty());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    let err = engine
        .translate_field(
            "Some text",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::EmptyResponse));
}

#[tokio::test]
async fn test_translateField_withShortText_shouldUseMinimumTokenBudget() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    engine
        .translate_field(
            "Tiny",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap();

    let request = &provider.requests()[0];
    assert_eq!(request.max_output_tokens, 256);
    assert!((request.temperature - 0.3).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_translateField_withLongText_shouldScaleTokenBudget() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let text = "word ".repeat(1000);
    let mut costs = CostAccumulator::new();
    engine
        .translate_field(
            &text,
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Excerpt,
            &mut costs,
        )
        .await
        .unwrap();

    // ceil(1000 * 1.3 * 1.2) = 1560
    let request = &provider.requests()[0];
    assert_eq!(request.max_output_tokens, 1560);
}

#[tokio::test]
async fn test_translateField_withBodyContext_shouldWrapWithMarkupInstruction() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    engine
        .translate_field(
            "<p>Hello</p>",
            LanguageCode::En,
            LanguageCode::De,
            FieldContext::Body,
            &mut costs,
        )
        .await
        .unwrap();

    let request = &provider.requests()[0];
    assert!(request.user_prompt.contains("preserving all markup exactly"));
    assert!(request.user_prompt.contains("<p>Hello</p>"));
    assert!(request.system_prompt.contains("German"));
}

#[tokio::test]
async fn test_translateField_withAnyCall_shouldAppendToLedger() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let mut costs = CostAccumulator::new();
    engine
        .translate_field(
            "Ledger me",
            LanguageCode::En,
            LanguageCode::Pt,
            FieldContext::Title,
            &mut costs,
        )
        .await
        .unwrap();

    let records = store.ledger_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metadata["target_language"], "pt");
    assert_eq!(records[0].metadata["context"], "title");
    assert!(records[0].amount > 0.0);
}

#[tokio::test]
async fn test_translateLongText_withShortBody_shouldMakeSingleCall() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let body = html_body(3, 50);
    let mut costs = CostAccumulator::new();
    let out = engine
        .translate_long_text(&body, LanguageCode::En, LanguageCode::De, &mut costs)
        .await
        .unwrap();

    assert!(!out.is_empty());
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translateLongText_with4500WordBody_shouldTranslateThreeChunks() {
    let store = MemoryStore::new();
    let provider = Arc::new(MockProvider::working());
    let engine = engine_with(provider.clone(), &store);

    let body = html_body(45, 100);
    let mut costs = CostAccumulator::new();
    let out = engine
        .translate_long_text(&body, LanguageCode::En, LanguageCode::De, &mut costs)
        .await
        .unwrap();

    assert_eq!(provider.request_count(), 3);
    assert_eq!(costs.len(), 3);
    // Chunks are joined with a blank line
    assert_eq!(out.matches("[translated]").count(), 3);

    // No duplicated or dropped paragraphs across the rejoined document
    for p in 0..45 {
        let marker = format!("word{}x0", p);
        assert_eq!(out.matches(&marker).count(), 1, "paragraph {} lost", p);
    }
}

#[tokio::test]
async fn test_translateLongText_withFailingChunk_shouldAbortWholeField() {
    let store = MemoryStore::new();
    // First request (chunk 0) is refused, so the field fails at index 0
    let provider = Arc::new(MockProvider::rate_limited(99));
    let engine = engine_with(provider.clone(), &store);

    let body = html_body(45, 100);
    let mut costs = CostAccumulator::new();
    let err = engine
        .translate_long_text(&body, LanguageCode::En, LanguageCode::De, &mut costs)
        .await
        .unwrap_err();

    match &err {
        TranslationError::ChunkFailed { index, .. } => assert_eq!(*index, 0),
        other => panic!("expected ChunkFailed, got {:?}", other),
    }
    // Rate-limit failures stay retryable through the chunk wrapper
    assert!(err.is_retryable());
}
