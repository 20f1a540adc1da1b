/*!
 * Structure-preserving chunking for long HTML bodies.
 *
 * Long bodies are split at closing block boundaries so no chunk boundary
 * ever falls inside a tag, and concatenating the chunks in order
 * reconstructs the original text byte-for-byte.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Closing block tags that mark legal split points
static BLOCK_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(?:h2|h3|p|div|li)>").expect("invalid boundary regex"));

/// HTML tags, stripped before counting words
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Count words in the text with tags stripped
pub fn word_count(text: &str) -> usize {
    TAG.replace_all(text, " ").split_whitespace().count()
}

/// Split text into fragments ending at closing block boundaries.
///
/// The trailing remainder after the last boundary is its own fragment.
/// Concatenating the fragments reproduces the input exactly.
fn split_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for boundary in BLOCK_BOUNDARY.find_iter(text) {
        fragments.push(&text[start..boundary.end()]);
        start = boundary.end();
    }

    if start < text.len() {
        fragments.push(&text[start..]);
    }

    fragments
}

/// Split a long HTML body into chunks of at most `word_limit` tag-stripped
/// words each.
///
/// Fragments are accumulated greedily: a chunk is closed when adding the
/// next fragment would push it past the limit, so chunks are maximal. A
/// single fragment longer than the limit stays whole — boundary safety
/// takes precedence over the ceiling.
pub fn split_chunks(text: &str, word_limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_words = 0;

    for fragment in split_fragments(text) {
        let fragment_words = word_count(fragment);

        if !current.is_empty() && current_words + fragment_words > word_limit {
            chunks.push(std::mem::take(&mut current));
            current_words = 0;
        }

        current.push_str(fragment);
        current_words += fragment_words;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
