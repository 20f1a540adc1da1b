/*!
 * Supported language codes and script metadata.
 *
 * The pipeline works against a closed set of nine publishing languages.
 * Every orchestration input and output is validated against this set;
 * anything else fails fast with an `UnsupportedLanguage` error.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::OrchestrationError;

/// Script family of a language, used to pick slug transliteration tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Latin alphabet (possibly with diacritics)
    Latin,
    /// Cyrillic alphabet
    Cyrillic,
    /// Han ideographs
    Han,
    /// Arabic abjad
    Arabic,
    /// Devanagari abugida
    Devanagari,
}

/// A supported publishing language, identified by its ISO 639-1 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    /// English
    En,
    /// German
    De,
    /// French
    Fr,
    /// Spanish
    Es,
    /// Portuguese
    Pt,
    /// Russian
    Ru,
    /// Chinese (Simplified)
    Zh,
    /// Arabic
    Ar,
    /// Hindi
    Hi,
}

impl LanguageCode {
    /// All supported languages in canonical order.
    ///
    /// This order is used whenever a batch is started without an explicit
    /// target list, so repeated batches attempt languages deterministically.
    pub fn all() -> &'static [LanguageCode] {
        use LanguageCode::*;
        &[En, De, Fr, Es, Pt, Ru, Zh, Ar, Hi]
    }

    /// The ISO 639-1 two-letter code
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
            LanguageCode::Pt => "pt",
            LanguageCode::Ru => "ru",
            LanguageCode::Zh => "zh",
            LanguageCode::Ar => "ar",
            LanguageCode::Hi => "hi",
        }
    }

    /// English name of the language, for use in prompts
    pub fn name(&self) -> &'static str {
        isolang::Language::from_639_1(self.as_str())
            .map(|l| l.to_name())
            .unwrap_or("Unknown")
    }

    /// Script family the language is written in
    pub fn script(&self) -> Script {
        match self {
            LanguageCode::En
            | LanguageCode::De
            | LanguageCode::Fr
            | LanguageCode::Es
            | LanguageCode::Pt => Script::Latin,
            LanguageCode::Ru => Script::Cyrillic,
            LanguageCode::Zh => Script::Han,
            LanguageCode::Ar => Script::Arabic,
            LanguageCode::Hi => Script::Devanagari,
        }
    }

    /// Whether slugs for this language need transliteration to Latin
    pub fn requires_transliteration(&self) -> bool {
        self.script() != Script::Latin
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = OrchestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(LanguageCode::En),
            "de" => Ok(LanguageCode::De),
            "fr" => Ok(LanguageCode::Fr),
            "es" => Ok(LanguageCode::Es),
            "pt" => Ok(LanguageCode::Pt),
            "ru" => Ok(LanguageCode::Ru),
            "zh" => Ok(LanguageCode::Zh),
            "ar" => Ok(LanguageCode::Ar),
            "hi" => Ok(LanguageCode::Hi),
            other => Err(OrchestrationError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = OrchestrationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.as_str().to_string()
    }
}
