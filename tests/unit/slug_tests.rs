/*!
 * Tests for slug generation and per-script transliteration
 */

use polypress::language::LanguageCode;
use polypress::slug::{
    generate_slug, slugify, ArabicTransliterator, ChineseTransliterator, CyrillicTransliterator,
    DevanagariTransliterator, Transliterator, MAX_SLUG_LENGTH,
};

#[test]
fn test_generateSlug_withRussianTitle_shouldTransliterate() {
    let slug = generate_slug("Новости компании", LanguageCode::Ru);
    assert_eq!(slug, "novosti-kompanii");
}

#[test]
fn test_generateSlug_withLatinTitle_shouldFoldDiacritics() {
    let slug = generate_slug("Über uns: öffnen!", LanguageCode::De);
    assert_eq!(slug, "uber-uns-offnen");
}

#[test]
fn test_generateSlug_withGermanSharpS_shouldExpandToSs() {
    let slug = generate_slug("Straße", LanguageCode::De);
    assert_eq!(slug, "strasse");
}

#[test]
fn test_generateSlug_withChineseTitle_shouldUsePinyin() {
    let slug = generate_slug("中国新闻", LanguageCode::Zh);
    assert_eq!(slug, "zhong-guo-xin-wen");
}

#[test]
fn test_generateSlug_withHindiTitle_shouldTransliterate() {
    let slug = generate_slug("हिंदी", LanguageCode::Hi);
    assert_eq!(slug, "hindi");
}

#[test]
fn test_generateSlug_withArabicTitle_shouldTransliterate() {
    let slug = generate_slug("مرحبا", LanguageCode::Ar);
    assert_eq!(slug, "mrhba");
}

#[test]
fn test_generateSlug_withAnyInput_shouldBeDeterministic() {
    let titles = [
        ("Hello World", LanguageCode::En),
        ("Новости компании", LanguageCode::Ru),
        ("中国龘龘新闻", LanguageCode::Zh),
        ("🎉🎉", LanguageCode::En),
    ];
    for (title, lang) in titles {
        let first = generate_slug(title, lang);
        let second = generate_slug(title, lang);
        assert_eq!(first, second, "slug not deterministic for {:?}", title);
    }
}

#[test]
fn test_generateSlug_withUnmappedHanCharacter_shouldUseHashFallback() {
    // 龘 is not in the curated dictionary
    let slug = generate_slug("龘", LanguageCode::Zh);
    assert!(!slug.is_empty());
    assert!(slug.starts_with('z'), "unexpected fallback slug {}", slug);
    assert_eq!(slug, generate_slug("龘", LanguageCode::Zh));
}

#[test]
fn test_generateSlug_withNoUsableCharacters_shouldFallBackToHashToken() {
    let slug = generate_slug("🎉🎉🎉", LanguageCode::En);
    assert!(slug.starts_with("en-"));
    assert_eq!(slug.len(), "en-".len() + 8);
}

#[test]
fn test_generateSlug_withAnyInput_shouldProduceCleanHyphens() {
    let titles = [
        "  -- lots --- of -- hyphens --  ",
        "mixed Русский and english",
        "punctuation!!! everywhere??? ok...",
    ];
    for title in titles {
        let slug = generate_slug(title, LanguageCode::En);
        assert!(!slug.contains("--"), "double hyphen in {}", slug);
        assert!(!slug.starts_with('-'), "leading hyphen in {}", slug);
        assert!(!slug.ends_with('-'), "trailing hyphen in {}", slug);
        assert!(slug.len() <= MAX_SLUG_LENGTH);
    }
}

#[test]
fn test_generateSlug_withVeryLongTitle_shouldCapAtHyphenBoundary() {
    let title = "word ".repeat(100);
    let slug = generate_slug(&title, LanguageCode::En);
    assert!(slug.len() <= MAX_SLUG_LENGTH);
    assert!(!slug.ends_with('-'));
    // Cut at a hyphen boundary, never mid-word
    assert!(slug.split('-').all(|part| part == "word"));
}

#[test]
fn test_slugify_withMixedInput_shouldLowercaseAndHyphenate() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("A  B   C"), "a-b-c");
    assert_eq!(slugify(""), "");
}

#[test]
fn test_cyrillicTransliterator_withFullAlphabet_shouldMapEveryLetter() {
    let out = CyrillicTransliterator.transliterate("Жизнь щедра");
    assert_eq!(out, "zhizn shchedra");
}

#[test]
fn test_cyrillicTransliterator_withAsciiInput_shouldPassThrough() {
    assert_eq!(CyrillicTransliterator.transliterate("abc 123"), "abc 123");
}

#[test]
fn test_arabicTransliterator_withDiacritics_shouldStripThem() {
    // "مُحَمَّد" with harakat reduces to the base letters
    let out = ArabicTransliterator.transliterate("مُحَمَّد");
    assert_eq!(out, "mhmd");
}

#[test]
fn test_devanagariTransliterator_withMatras_shouldSuppressInherentVowel() {
    let out = DevanagariTransliterator.transliterate("नमस्ते");
    assert_eq!(out, "namaste");
}

#[test]
fn test_devanagariTransliterator_withNuktaConsonants_shouldMapBothSpellings() {
    let transliterator = DevanagariTransliterator;
    // Precomposed U+095B and decomposed ज + U+093C are the same letter
    assert_eq!(transliterator.transliterate("\u{095B}"), "za");
    assert_eq!(transliterator.transliterate("\u{091C}\u{093C}"), "za");

    // "zindagi" spelled with the decomposed nukta
    let word = "\u{091C}\u{093C}\u{093F}\u{0902}\u{0926}\u{0917}\u{0940}";
    assert_eq!(transliterator.transliterate(word), "zindagi");
}

#[test]
fn test_generateSlug_withDecomposedNuktaTitle_shouldTransliterate() {
    // "ज़िंदगी" with ज़ spelled as ज + nukta, as NFC leaves it
    let title = "\u{091C}\u{093C}\u{093F}\u{0902}\u{0926}\u{0917}\u{0940}";
    assert_eq!(generate_slug(title, LanguageCode::Hi), "zindagi");
}

#[test]
fn test_chineseTransliterator_withMappedCharacters_shouldSpaceSyllables() {
    let out = ChineseTransliterator.transliterate("新闻");
    assert_eq!(out.split_whitespace().collect::<Vec<_>>(), vec!["xin", "wen"]);
}
