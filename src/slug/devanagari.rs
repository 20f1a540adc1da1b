/*!
 * Devanagari-to-Latin transliteration tables.
 *
 * Consonants carry an inherent `a` that is suppressed when a dependent
 * vowel sign (matra) or virama follows, which keeps common Hindi words
 * readable: `हिंदी` becomes `hindi`, not `hainadai`.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Transliterator;

/// Consonant table, base form without the inherent vowel
static CONSONANTS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('क', "k"),
        ('ख', "kh"),
        ('ग', "g"),
        ('घ', "gh"),
        ('ङ', "ng"),
        ('च', "ch"),
        ('छ', "chh"),
        ('ज', "j"),
        ('झ', "jh"),
        ('ञ', "ny"),
        ('ट', "t"),
        ('ठ', "th"),
        ('ड', "d"),
        ('ढ', "dh"),
        ('ण', "n"),
        ('त', "t"),
        ('थ', "th"),
        ('द', "d"),
        ('ध', "dh"),
        ('न', "n"),
        ('प', "p"),
        ('फ', "ph"),
        ('ब', "b"),
        ('भ', "bh"),
        ('म', "m"),
        ('य', "y"),
        ('र', "r"),
        ('ल', "l"),
        ('व', "v"),
        ('श', "sh"),
        ('ष', "sh"),
        ('स', "s"),
        ('ह', "h"),
        // Nukta consonants, keyed precomposed (U+0958..U+095E)
        ('\u{0958}', "q"),  // क़
        ('\u{0959}', "kh"), // ख़
        ('\u{095A}', "gh"), // ग़
        ('\u{095B}', "z"),  // ज़
        ('\u{095C}', "r"),  // ड़
        ('\u{095D}', "rh"), // ढ़
        ('\u{095E}', "f"),  // फ़
    ])
});

/// Precomposed form of a base consonant followed by nukta. The precomposed
/// codepoints are composition exclusions, so NFC-normalized text still
/// carries the two-codepoint spelling; both must resolve to the same entry.
fn compose_nukta(base: char) -> Option<char> {
    Some(match base {
        'क' => '\u{0958}',
        'ख' => '\u{0959}',
        'ग' => '\u{095A}',
        'ज' => '\u{095B}',
        'ड' => '\u{095C}',
        'ढ' => '\u{095D}',
        'फ' => '\u{095E}',
        _ => return None,
    })
}

/// Independent vowel table
static VOWELS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('अ', "a"),
        ('आ', "aa"),
        ('इ', "i"),
        ('ई', "i"),
        ('उ', "u"),
        ('ऊ', "u"),
        ('ऋ', "ri"),
        ('ए', "e"),
        ('ऐ', "ai"),
        ('ओ', "o"),
        ('औ', "au"),
    ])
});

/// Dependent vowel signs (matras) attaching to a preceding consonant
static MATRAS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('\u{093E}', "a"),  // ा
        ('\u{093F}', "i"),  // ि
        ('\u{0940}', "i"),  // ी
        ('\u{0941}', "u"),  // ु
        ('\u{0942}', "u"),  // ू
        ('\u{0943}', "ri"), // ृ
        ('\u{0947}', "e"),  // े
        ('\u{0948}', "ai"), // ै
        ('\u{094B}', "o"),  // ो
        ('\u{094C}', "au"), // ौ
    ])
});

/// Virama suppresses the inherent vowel of the preceding consonant
const VIRAMA: char = '\u{094D}';
/// Anusvara, rendered as a nasal `n`
const ANUSVARA: char = '\u{0902}';
/// Visarga, rendered as `h`
const VISARGA: char = '\u{0903}';
/// Nukta, folded into the preceding consonant before table lookup
const NUKTA: char = '\u{093C}';

/// Transliterator for Devanagari-script titles
pub struct DevanagariTransliterator;

impl Transliterator for DevanagariTransliterator {
    fn transliterate(&self, text: &str) -> String {
        // Fold base + nukta pairs into their precomposed consonant first,
        // so the main loop only ever sees single-codepoint consonants
        let mut chars: Vec<char> = Vec::with_capacity(text.len());
        for c in text.chars() {
            if c == NUKTA {
                if let Some(last) = chars.last_mut() {
                    if let Some(composed) = compose_nukta(*last) {
                        *last = composed;
                    }
                }
                // Stray or unmappable nukta is dropped either way
                continue;
            }
            chars.push(c);
        }

        let mut out = String::with_capacity(text.len());

        for (i, &c) in chars.iter().enumerate() {
            if let Some(base) = CONSONANTS.get(&c) {
                out.push_str(base);
                // Inherent vowel unless a matra or virama follows
                let next = chars.get(i + 1);
                let suppressed = matches!(next, Some(n) if MATRAS.contains_key(n) || *n == VIRAMA);
                if !suppressed {
                    out.push('a');
                }
            } else if let Some(vowel) = VOWELS.get(&c) {
                out.push_str(vowel);
            } else if let Some(matra) = MATRAS.get(&c) {
                out.push_str(matra);
            } else {
                match c {
                    VIRAMA => {}
                    ANUSVARA => out.push('n'),
                    VISARGA => out.push('h'),
                    '।' | '॥' => out.push(' '),
                    other => out.push(other),
                }
            }
        }

        out
    }
}
