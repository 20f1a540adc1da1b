/*!
 * Arabic-to-Latin transliteration table.
 *
 * Single-letter substitution plus diacritic stripping: the short-vowel and
 * tanween marks (U+064B..U+0652) carry no slug value and are removed.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Transliterator;

/// Letter substitution table
static ARABIC_MAP: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('ا', "a"),
        ('أ', "a"),
        ('إ', "i"),
        ('آ', "a"),
        ('ب', "b"),
        ('ت', "t"),
        ('ث', "th"),
        ('ج', "j"),
        ('ح', "h"),
        ('خ', "kh"),
        ('د', "d"),
        ('ذ', "dh"),
        ('ر', "r"),
        ('ز', "z"),
        ('س', "s"),
        ('ش', "sh"),
        ('ص', "s"),
        ('ض', "d"),
        ('ط', "t"),
        ('ظ', "z"),
        ('ع', "a"),
        ('غ', "gh"),
        ('ف', "f"),
        ('ق', "q"),
        ('ك', "k"),
        ('ل', "l"),
        ('م', "m"),
        ('ن', "n"),
        ('ه', "h"),
        ('و', "w"),
        ('ي', "y"),
        ('ى', "a"),
        ('ء', ""),
        ('ؤ', "w"),
        ('ئ', "y"),
        ('ة', "a"),
        ('ﻻ', "la"),
    ])
});

/// Harakat and tanween range stripped during transliteration
fn is_arabic_diacritic(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c) || c == '\u{0670}'
}

/// Transliterator for Arabic-script titles
pub struct ArabicTransliterator;

impl Transliterator for ArabicTransliterator {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if is_arabic_diacritic(c) {
                continue;
            }
            match ARABIC_MAP.get(&c) {
                Some(mapped) => out.push_str(mapped),
                None => out.push(c),
            }
        }
        out
    }
}
