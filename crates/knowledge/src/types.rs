//! Source model shared by retrieval, context building and answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection a source passage comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Quran,
    Hadith,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quran => write!(f, "quran"),
            Self::Hadith => write!(f, "hadith"),
        }
    }
}

/// One retrieved passage: a Quran verse or a Hadith narration.
///
/// Built once per request by a retriever and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Human-readable citation, e.g. "Surah Al-Baqarah (2:153)"
    pub reference: String,

    pub arabic_text: String,

    pub translation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
}

impl Source {
    pub fn quran(
        reference: impl Into<String>,
        arabic_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self::new(SourceType::Quran, reference, arabic_text, translation)
    }

    pub fn hadith(
        reference: impl Into<String>,
        arabic_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self::new(SourceType::Hadith, reference, arabic_text, translation)
    }

    fn new(
        source_type: SourceType,
        reference: impl Into<String>,
        arabic_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            source_type,
            reference: reference.into(),
            arabic_text: arabic_text.into(),
            translation: translation.into(),
            relevance_score: None,
        }
    }

    pub fn with_relevance_score(mut self, score: f32) -> Self {
        self.relevance_score = Some(score);
        self
    }
}
