/*!
 * Encoding validation and text sanitization.
 *
 * Every text entering or leaving the pipeline passes through this module.
 * `validate_utf8` is the strict path; `ensure_utf8` is the best-effort path
 * that never fails; `sanitize_content` is the single normalization pipeline
 * applied to every translated field before it is cached or persisted.
 */

use encoding_rs::Encoding;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::errors::EncodingError;

/// Detection candidates tried by `ensure_utf8`, in priority order:
/// UTF-8, the Latin-1 family, Central European and Cyrillic Windows code
/// pages, KOI8-R, two CJK legacy encodings, and the Arabic ISO set.
static DETECTION_CANDIDATES: &[&Encoding] = &[
    encoding_rs::UTF_8,
    encoding_rs::WINDOWS_1252,
    encoding_rs::WINDOWS_1250,
    encoding_rs::WINDOWS_1251,
    encoding_rs::KOI8_R,
    encoding_rs::GBK,
    encoding_rs::SHIFT_JIS,
    encoding_rs::ISO_8859_6,
];

/// Runs of whitespace other than newlines collapse to a single space
static INLINE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("invalid inline whitespace regex"));

/// Three or more consecutive newlines collapse to a blank line
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("invalid newline regex"));

/// Strictly validate that a byte sequence is well-formed UTF-8.
///
/// Unlike `ensure_utf8`, this never guesses: a single invalid sequence
/// fails with an `EncodingError` carrying the byte offset.
pub fn validate_utf8(bytes: &[u8]) -> Result<&str, EncodingError> {
    std::str::from_utf8(bytes).map_err(|e| EncodingError::InvalidUtf8 {
        position: e.valid_up_to(),
    })
}

/// Convert an arbitrary byte sequence to valid UTF-8, best effort.
///
/// Valid UTF-8 passes through unchanged. Otherwise each detection candidate
/// is tried in priority order and the first clean, plausible decode wins.
/// The plausibility gate matters because windows-1252 maps all 256 byte
/// values, so on error count alone it would claim every input before the
/// Cyrillic, CJK and Arabic candidates are ever reached. As a last resort
/// the bytes are folded to ASCII (one `?` per unmappable byte), so the
/// result is never empty for non-empty input and this function never
/// fails. Callers that need strictness must call `validate_utf8` instead.
pub fn ensure_utf8(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    for encoding in DETECTION_CANDIDATES {
        let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
        if !had_errors && plausible_decode(&decoded) {
            debug!("Decoded {} bytes as {}", bytes.len(), encoding.name());
            return decoded.into_owned();
        }
    }

    warn!(
        "No candidate encoding decoded {} bytes cleanly, folding to ASCII",
        bytes.len()
    );
    ascii_fold(bytes)
}

/// Reject decodes that are clean at the byte level but unlikely to be real
/// text. C1 controls never occur in editorial content, and a run of four or
/// more consecutive accented Latin letters is the signature of a single-byte
/// code page misreading Cyrillic or CJK bytes rather than an actual word.
fn plausible_decode(text: &str) -> bool {
    let mut accented_run = 0usize;
    for c in text.chars() {
        if ('\u{0080}'..='\u{009F}').contains(&c) {
            return false;
        }
        if ('\u{00A0}'..='\u{024F}').contains(&c) {
            accented_run += 1;
            if accented_run >= 4 {
                return false;
            }
        } else {
            accented_run = 0;
        }
    }
    true
}

/// Lossy fold to printable ASCII, used only when every decode attempt failed
fn ascii_fold(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' || b == b'\n' || b == b'\t' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

/// Convenience for ingestion boundaries: decode then sanitize in one step
pub fn sanitize_bytes(bytes: &[u8]) -> String {
    sanitize_content(&ensure_utf8(bytes))
}

/// Normalize a text field for caching and persistence.
///
/// Pipeline: strip leading BOM, normalize line endings to `\n`, strip
/// control characters except `\n`/`\t`, convert non-breaking and narrow
/// spaces to ordinary spaces, collapse runs of non-newline whitespace to one
/// space, collapse 3+ newlines to 2, trim, then Unicode NFC. Composition
/// runs last: stripping a control character can bring a combining mark next
/// to its base, and that pair must compose within the same pass for the
/// function to be idempotent.
pub fn sanitize_content(text: &str) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                // \r\n and bare \r both become \n
                if chars.peek() != Some(&'\n') {
                    cleaned.push('\n');
                }
            }
            '\u{00A0}' | '\u{202F}' | '\u{2007}' => cleaned.push(' '),
            '\n' | '\t' => cleaned.push(c),
            c if c.is_control() => {}
            c => cleaned.push(c),
        }
    }

    let collapsed = INLINE_WHITESPACE.replace_all(&cleaned, " ");
    let collapsed = EXCESS_NEWLINES.replace_all(&collapsed, "\n\n");

    collapsed.trim().nfc().collect()
}

/// Whether the text contains Cyrillic characters (U+0400..U+04FF)
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Whether the text contains Han ideographs (U+4E00..U+9FFF)
pub fn has_chinese(text: &str) -> bool {
    text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c))
}

/// Whether the text contains Arabic characters (U+0600..U+06FF)
pub fn has_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Whether the text contains Devanagari characters (U+0900..U+097F)
pub fn has_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}
