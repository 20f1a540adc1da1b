/*!
 * Cyrillic-to-Latin transliteration table.
 *
 * Single-letter substitution following the common romanization used for
 * Russian-language URLs.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Transliterator;

/// Letter substitution table, lowercase only; input is lowercased first
static CYRILLIC_MAP: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('а', "a"),
        ('б', "b"),
        ('в', "v"),
        ('г', "g"),
        ('д', "d"),
        ('е', "e"),
        ('ё', "yo"),
        ('ж', "zh"),
        ('з', "z"),
        ('и', "i"),
        ('й', "y"),
        ('к', "k"),
        ('л', "l"),
        ('м', "m"),
        ('н', "n"),
        ('о', "o"),
        ('п', "p"),
        ('р', "r"),
        ('с', "s"),
        ('т', "t"),
        ('у', "u"),
        ('ф', "f"),
        ('х', "kh"),
        ('ц', "ts"),
        ('ч', "ch"),
        ('ш', "sh"),
        ('щ', "shch"),
        ('ъ', ""),
        ('ы', "y"),
        ('ь', ""),
        ('э', "e"),
        ('ю', "yu"),
        ('я', "ya"),
        // Ukrainian and Belarusian extensions
        ('є', "ye"),
        ('і', "i"),
        ('ї', "yi"),
        ('ґ', "g"),
        ('ў', "u"),
    ])
});

/// Transliterator for Cyrillic-script titles
pub struct CyrillicTransliterator;

impl Transliterator for CyrillicTransliterator {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let lower = c.to_lowercase().next().unwrap_or(c);
            match CYRILLIC_MAP.get(&lower) {
                Some(mapped) => out.push_str(mapped),
                None => out.push(c),
            }
        }
        out
    }
}
