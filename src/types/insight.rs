//! Analysis outputs: keyword rankings, aspect summaries and sentiment ratios

use serde::{Deserialize, Serialize};

use super::review::Review;

// =============================================================================
// Keywords
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectKeywords {
    pub aspect: String,
    /// Ranked by score, highest first
    pub keywords: Vec<Keyword>,
}

/// Aspect name to ranked keywords, in aspect declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    aspects: Vec<AspectKeywords>,
}

impl KeywordSet {
    pub fn new(aspects: Vec<AspectKeywords>) -> Self {
        Self { aspects }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectKeywords> {
        self.aspects.iter()
    }

    pub fn get(&self, aspect: &str) -> Option<&[Keyword]> {
        self.aspects
            .iter()
            .find(|a| a.aspect == aspect)
            .map(|a| a.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }

    /// `word(0.42), word(0.17)` rendering used by tables and prompts
    pub fn format_keywords(keywords: &[Keyword]) -> String {
        keywords
            .iter()
            .map(|k| format!("{}({:.2})", k.word, k.score))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Aspect Summaries
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSummary {
    pub aspect: String,
    /// Reviews whose text touches this aspect
    pub mentions: usize,
    pub positive: usize,
    pub negative: usize,
    /// Share of positive among classified mentions, 0-100
    pub positive_ratio: f32,
    pub summary: String,
}

// =============================================================================
// Summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Percentage of positive reviews among classified ones
    pub positive_ratio: f32,
    /// Percentage of negative reviews among classified ones
    pub negative_ratio: f32,
    pub top_positive: Vec<Review>,
    pub top_negative: Vec<Review>,
    /// Reviews labelled positive or negative
    pub classified_count: usize,
}

impl AnalysisSummary {
    /// Build ratios from label counts; both ratios are zero when nothing was classified
    pub fn ratios(positive: usize, negative: usize) -> (f32, f32) {
        let classified = positive + negative;
        if classified == 0 {
            return (0.0, 0.0);
        }
        let pos = positive as f32 * 100.0 / classified as f32;
        (pos, 100.0 - pos)
    }
}
