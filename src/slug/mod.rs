/*!
 * Slug generation and script transliteration.
 *
 * Produces stable, URL-safe, lowercase-hyphenated slugs from titles in any
 * supported script. Transliteration is table-driven, one table per script,
 * behind the common `Transliterator` trait. `generate_slug` is a pure
 * function of `(title, language)` — no I/O, no randomness — because slugs
 * must be reproducible across retries.
 */

use sha2::{Digest, Sha256};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::language::{LanguageCode, Script};

pub mod arabic;
pub mod chinese;
pub mod cyrillic;
pub mod devanagari;

pub use arabic::ArabicTransliterator;
pub use chinese::ChineseTransliterator;
pub use cyrillic::CyrillicTransliterator;
pub use devanagari::DevanagariTransliterator;

/// Maximum slug length in characters; over-long slugs are cut at a hyphen
pub const MAX_SLUG_LENGTH: usize = 200;

/// Maps text from one script into Latin characters for slug purposes
pub trait Transliterator {
    /// Transliterate the input into Latin text. ASCII passes through
    /// unchanged; output words are separated by spaces where the script
    /// has no spacing of its own.
    fn transliterate(&self, text: &str) -> String;
}

/// Generate a URL-safe slug from a title in the given language.
///
/// Non-Latin scripts are transliterated with their per-script table first;
/// Latin titles only have their diacritics folded. If cleanup leaves
/// nothing usable, a deterministic hash-derived token is returned so the
/// result is never empty.
pub fn generate_slug(title: &str, language: LanguageCode) -> String {
    let transliterated = match language.script() {
        Script::Latin => title.to_string(),
        Script::Cyrillic => CyrillicTransliterator.transliterate(title),
        Script::Han => ChineseTransliterator.transliterate(title),
        Script::Arabic => ArabicTransliterator.transliterate(title),
        Script::Devanagari => DevanagariTransliterator.transliterate(title),
    };

    let folded = fold_diacritics(&transliterated);
    let slug = slugify(&folded);

    if slug.is_empty() {
        format!("{}-{}", language.as_str(), short_hash(title))
    } else {
        slug
    }
}

/// Decompose and drop combining marks, so `é` becomes `e` and `ü` becomes `u`
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| match c {
            'ß' => "ss".chars().collect::<Vec<_>>(),
            'æ' | 'Æ' => "ae".chars().collect(),
            'œ' | 'Œ' => "oe".chars().collect(),
            'ø' | 'Ø' => "o".chars().collect(),
            'ð' | 'Ð' => "d".chars().collect(),
            'þ' | 'Þ' => "th".chars().collect(),
            'ł' | 'Ł' => "l".chars().collect(),
            other => vec![other],
        })
        .collect()
}

/// Lowercase, replace non-alphanumerics with hyphens, then clean up:
/// collapse repeated hyphens, trim leading/trailing hyphens, cap the
/// length at a hyphen boundary.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    truncate_at_hyphen(&slug, MAX_SLUG_LENGTH)
}

/// Cut a slug to at most `max` characters without splitting a word
fn truncate_at_hyphen(slug: &str, max: usize) -> String {
    if slug.len() <= max {
        return slug.to_string();
    }

    let head = &slug[..max];
    match head.rfind('-') {
        Some(pos) if pos > 0 => head[..pos].to_string(),
        _ => head.to_string(),
    }
}

/// First 8 hex characters of the SHA-256 of the input
pub(crate) fn short_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..8].to_string()
}
