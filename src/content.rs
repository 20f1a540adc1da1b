/*!
 * Domain models for editorial content and its translations.
 *
 * These structures are the units the orchestrator reads from and writes to
 * the content store. `SourceContent` is read-only for the pipeline; a
 * `TranslatedArtifact` is created once per (content, language) pair and is
 * content-immutable after it reaches `Active` status.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

/// One question/answer pair attached to a content item.
///
/// FAQ order is meaningful and is preserved through translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    /// The question text
    pub question: String,
    /// The answer text
    pub answer: String,
}

/// A source content item, owned by the editorial workflow.
///
/// The pipeline only reads this record; it is treated as immutable for
/// the duration of a translation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceContent {
    /// Stable content identifier
    pub id: String,
    /// Language the content was authored in
    pub source_language: LanguageCode,
    /// Article title
    pub title: String,
    /// Short teaser/excerpt
    pub excerpt: String,
    /// Long-form HTML body
    pub body_html: String,
    /// Alt text of the hero image, if any
    pub image_alt: Option<String>,
    /// Ordered FAQ entries
    pub faqs: Vec<FaqPair>,
}

/// Lifecycle status of a translated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    /// Created but not yet published
    Draft,
    /// Published and content-immutable
    Active,
    /// Translation attempt ended in an unrecoverable error
    Failed,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::Draft => write!(f, "draft"),
            ArtifactStatus::Active => write!(f, "active"),
            ArtifactStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ArtifactStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ArtifactStatus::Draft),
            "active" => Ok(ArtifactStatus::Active),
            "failed" => Ok(ArtifactStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid artifact status: {}", s)),
        }
    }
}

/// SEO metadata supplied by the enrichment collaborator after translation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoMetadata {
    /// Meta title, capped near 60 characters
    pub meta_title: String,
    /// Meta description, capped near 160 characters
    pub meta_description: String,
    /// Canonical URL for the localized page
    pub canonical_url: String,
}

/// A persisted, language-specific translation of a source content item.
///
/// Invariant: at most one non-deleted artifact exists per
/// (content_id, language) pair. Retranslation is delete-then-create,
/// never update-in-place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedArtifact {
    /// Artifact identifier (UUID v4)
    pub id: String,
    /// Identifier of the source content this artifact translates
    pub content_id: String,
    /// Target language of this artifact
    pub language: LanguageCode,
    /// Translated title
    pub title: String,
    /// URL-safe slug derived from the translated title
    pub slug: String,
    /// Translated excerpt
    pub excerpt: String,
    /// Translated HTML body
    pub body_html: String,
    /// Translated image alt text, if the source had one
    pub image_alt: Option<String>,
    /// Translated FAQ entries, original order preserved
    pub faqs: Vec<FaqPair>,
    /// Lifecycle status
    pub status: ArtifactStatus,
    /// Accumulated monetary cost of producing this artifact, in USD
    pub cost: f64,
    /// SEO metadata, enriched after translation (non-content, mutable)
    pub seo: Option<SeoMetadata>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Read-side summary of translation coverage for one content item
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationStats {
    /// Number of possible target languages (supported set minus source)
    pub total_targets: usize,
    /// Languages with an existing artifact
    pub translated: Vec<LanguageCode>,
    /// Languages without an artifact
    pub missing: Vec<LanguageCode>,
}

/// Outcome of one batch translation across a set of target languages.
///
/// Transient, returned to the batch caller; never persisted.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Languages translated successfully in this batch
    pub succeeded: Vec<LanguageCode>,
    /// Languages that failed, with the error message
    pub failed: Vec<(LanguageCode, String)>,
    /// Languages skipped because an artifact already existed
    pub skipped: Vec<LanguageCode>,
    /// Cost in USD of the artifacts committed by this batch. Spend on
    /// languages that failed partway through is not included here; the
    /// cost ledger records it per engine call.
    pub total_cost: f64,
}

impl BatchResult {
    /// Whether every attempted language succeeded or was skipped
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line human-readable summary of the batch outcome
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} failed, {} skipped, total cost ${:.4}",
            self.succeeded.len(),
            self.failed.len(),
            self.skipped.len(),
            self.total_cost
        )
    }
}
