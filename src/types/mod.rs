pub mod error;
pub mod insight;
pub mod review;
pub mod role;

pub use error::{ErrorKind, Result, ResultExt, ReviewError};
pub use insight::{AnalysisSummary, AspectKeywords, AspectSummary, Keyword, KeywordSet};
pub use review::{Platform, Review, ReviewRow, ReviewTable, SentimentLabel, SentimentScore};
pub use role::Role;

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Validated restaurant name: trimmed and never empty
///
/// Used as the aggregation cache key, so `"버거킹 "` and `"버거킹"` share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RestaurantName(String);

impl RestaurantName {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReviewError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RestaurantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RestaurantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
