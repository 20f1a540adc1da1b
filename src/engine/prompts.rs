/*!
 * Prompt construction for field translation.
 *
 * Each text field carries a `FieldContext` that selects a system-instruction
 * variant tuning tone and length constraints. The context set is a closed
 * enum with an exhaustive match, so adding a context is a compile-time
 * checked change.
 */

use std::fmt;

use crate::language::LanguageCode;

/// Semantic role of the text field being translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldContext {
    /// Article title
    Title,
    /// Short teaser/excerpt
    Excerpt,
    /// SEO meta title, capped near 60 characters
    MetaTitle,
    /// SEO meta description, capped near 160 characters
    MetaDescription,
    /// FAQ question
    FaqQuestion,
    /// FAQ answer
    FaqAnswer,
    /// Image alt text
    AltText,
    /// Long-form HTML body
    Body,
}

impl FieldContext {
    /// Stable identifier used in cache keys and cost metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldContext::Title => "title",
            FieldContext::Excerpt => "excerpt",
            FieldContext::MetaTitle => "meta_title",
            FieldContext::MetaDescription => "meta_description",
            FieldContext::FaqQuestion => "faq_question",
            FieldContext::FaqAnswer => "faq_answer",
            FieldContext::AltText => "alt_text",
            FieldContext::Body => "body",
        }
    }

    /// Context-specific constraints appended to the system prompt
    fn constraints(&self) -> &'static str {
        match self {
            FieldContext::Title => {
                "The text is an article title. Keep it concise and compelling. \
                 Do not add surrounding quotation marks or a trailing period."
            }
            FieldContext::Excerpt => {
                "The text is a short article teaser. Keep it to one or two \
                 engaging sentences."
            }
            FieldContext::MetaTitle => {
                "The text is an SEO meta title. Keep the translation under \
                 60 characters."
            }
            FieldContext::MetaDescription => {
                "The text is an SEO meta description. Keep the translation \
                 under 160 characters."
            }
            FieldContext::FaqQuestion => {
                "The text is a FAQ question. Keep it a single, naturally \
                 phrased question."
            }
            FieldContext::FaqAnswer => {
                "The text is a FAQ answer. Keep it concise and factual."
            }
            FieldContext::AltText => {
                "The text is image alt text. Keep it a short, plain \
                 description of the image."
            }
            FieldContext::Body => {
                "The text is an article body in HTML. Preserve every HTML \
                 tag and attribute exactly as given; translate only the \
                 human-readable text between tags."
            }
        }
    }
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the system prompt for one field translation
pub fn build_system_prompt(
    source: LanguageCode,
    target: LanguageCode,
    context: FieldContext,
) -> String {
    format!(
        "You are a professional translator. Translate the text the user \
         provides from {} to {}. {} Respond with the translated text only, \
         without explanations or notes.",
        source.name(),
        target.name(),
        context.constraints()
    )
}

/// Build the user prompt; body text is wrapped with an explicit
/// markup-preservation instruction
pub fn build_user_prompt(text: &str, context: FieldContext) -> String {
    match context {
        FieldContext::Body => format!(
            "Translate the following HTML, preserving all markup exactly:\n\n{}",
            text
        ),
        _ => text.to_string(),
    }
}
