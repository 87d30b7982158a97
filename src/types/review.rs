//! Review records and the unified review table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review platform, declared in collection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Kakao,
    Google,
    Naver,
}

impl Platform {
    /// All platforms in the order the aggregator queries them
    pub const ALL: [Platform; 3] = [Platform::Kakao, Platform::Google, Platform::Naver];

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Kakao => "카카오맵",
            Platform::Google => "구글",
            Platform::Naver => "네이버",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Kakao => write!(f, "kakao"),
            Platform::Google => write!(f, "google"),
            Platform::Naver => write!(f, "naver"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kakao" | "카카오" | "카카오맵" => Ok(Platform::Kakao),
            "google" | "구글" => Ok(Platform::Google),
            "naver" | "네이버" => Ok(Platform::Naver),
            _ => Err(format!(
                "Unknown platform: {}. Valid values: kakao, google, naver",
                s
            )),
        }
    }
}

/// A single review as reported by one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub platform: Platform,
    /// Restaurant name as the platform spells it
    pub restaurant_name: String,
    pub reviewer: String,
    pub text: String,
    /// Star rating on the platform's 1-5 scale
    pub rating: Option<f32>,
    pub date: Option<NaiveDate>,
}

impl Review {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

// =============================================================================
// Sentiment Column
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "긍정",
            SentimentLabel::Neutral => "중립",
            SentimentLabel::Negative => "부정",
        }
    }
}

/// Per-review sentiment written by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Combined score in [-1, 1]
    pub score: f32,
}

// =============================================================================
// Review Table
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    #[serde(flatten)]
    pub review: Review,
    /// `None` until analyzed, or when the review carries no signal at all
    pub sentiment: Option<SentimentScore>,
}

/// Ordered review collection with an optional sentiment column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewTable {
    rows: Vec<ReviewRow>,
}

impl ReviewTable {
    pub fn from_reviews(reviews: impl IntoIterator<Item = Review>) -> Self {
        Self {
            rows: reviews
                .into_iter()
                .map(|review| ReviewRow {
                    review,
                    sentiment: None,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn reviews(&self) -> impl Iterator<Item = &Review> {
        self.rows.iter().map(|row| &row.review)
    }

    /// Return a copy with the sentiment column filled in
    ///
    /// `scores` must have one entry per row.
    pub fn with_sentiment(&self, scores: Vec<Option<SentimentScore>>) -> Self {
        debug_assert_eq!(scores.len(), self.rows.len());
        Self {
            rows: self
                .rows
                .iter()
                .zip(scores)
                .map(|(row, sentiment)| ReviewRow {
                    review: row.review.clone(),
                    sentiment,
                })
                .collect(),
        }
    }

    /// Distinct (platform, restaurant name) pairs in first-seen order
    pub fn platform_names(&self) -> Vec<(Platform, String)> {
        let mut seen: Vec<(Platform, String)> = Vec::new();
        for review in self.reviews() {
            if !seen
                .iter()
                .any(|(p, n)| *p == review.platform && *n == review.restaurant_name)
            {
                seen.push((review.platform, review.restaurant_name.clone()));
            }
        }
        seen
    }

    pub fn count_by_platform(&self, platform: Platform) -> usize {
        self.reviews().filter(|r| r.platform == platform).count()
    }
}
