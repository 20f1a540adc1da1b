/*!
 * Tests for structure-preserving chunking of long HTML bodies
 */

use rand::prelude::IndexedRandom;
use rand::Rng;

use polypress::engine::chunker::{split_chunks, word_count};

use crate::common::html_body;

#[test]
fn test_wordCount_withTags_shouldCountOnlyText() {
    assert_eq!(word_count("<p>one two</p><p>three</p>"), 3);
    assert_eq!(word_count("<div class=\"x\">a</div>"), 1);
    assert_eq!(word_count(""), 0);
}

#[test]
fn test_wordCount_withAdjacentTags_shouldNotMergeWords() {
    // Tag removal must not glue neighbouring words together
    assert_eq!(word_count("<p>one</p><p>two</p>"), 2);
}

#[test]
fn test_splitChunks_withShortBody_shouldReturnSingleChunk() {
    let body = html_body(3, 10);
    let chunks = split_chunks(&body, 1500);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], body);
}

#[test]
fn test_splitChunks_withAnyBody_shouldRoundTripExactly() {
    let body = html_body(45, 100);
    let chunks = split_chunks(&body, 1500);
    assert_eq!(chunks.concat(), body);
}

#[test]
fn test_splitChunks_with4500WordBody_shouldProduceThreeMaximalChunks() {
    // 45 paragraphs of 100 words each, split at </p> boundaries
    let body = html_body(45, 100);
    let chunks = split_chunks(&body, 1500);

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(word_count(chunk) <= 1500);
    }
    // Maximal: each full chunk carries exactly the ceiling here
    assert_eq!(word_count(&chunks[0]), 1500);
    assert_eq!(word_count(&chunks[1]), 1500);
}

#[test]
fn test_splitChunks_withOversizedSingleFragment_shouldKeepItWhole() {
    // One paragraph over the limit cannot be split without breaking a tag
    let body = html_body(1, 2000);
    let chunks = split_chunks(&body, 1500);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], body);
}

#[test]
fn test_splitChunks_withTrailingTextAfterLastBoundary_shouldKeepIt() {
    let body = "<p>one two</p>trailing words here";
    let chunks = split_chunks(body, 1500);
    assert_eq!(chunks.concat(), body);
}

#[test]
fn test_splitChunks_withRandomNestedFragments_shouldNeverSplitInsideTag() {
    let mut rng = rand::rng();
    let tags = ["p", "div", "li", "h2", "h3"];

    for _ in 0..25 {
        // Random sequence of possibly nested block fragments
        let mut body = String::new();
        let blocks = rng.random_range(5..40);
        for b in 0..blocks {
            let tag = tags.choose(&mut rng).unwrap();
            let inner = tags.choose(&mut rng).unwrap();
            let words = rng.random_range(1..60);
            let nested = rng.random_bool(0.4);

            body.push_str(&format!("<{}>", tag));
            if nested {
                body.push_str(&format!("<{}>", inner));
            }
            for w in 0..words {
                body.push_str(&format!("w{}b{} ", w, b));
            }
            if nested {
                body.push_str(&format!("</{}>", inner));
            }
            body.push_str(&format!("</{}>", tag));
        }

        let chunks = split_chunks(&body, 50);

        // Round trip is byte-exact
        assert_eq!(chunks.concat(), body);

        // No chunk boundary falls inside an open tag: within each chunk
        // the last '<' is always closed by a later '>'
        for chunk in &chunks {
            let last_open = chunk.rfind('<');
            let last_close = chunk.rfind('>');
            match (last_open, last_close) {
                (Some(open), Some(close)) => {
                    assert!(close > open, "chunk ends inside a tag: {:?}", chunk)
                }
                (Some(_), None) => panic!("chunk ends inside a tag: {:?}", chunk),
                _ => {}
            }
        }
    }
}
