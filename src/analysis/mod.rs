//! Review Analysis
//!
//! Turns a [`ReviewTable`] into a sentiment-augmented table, per-aspect
//! keyword rankings, aspect summaries and polarity ratios.
//!
//! ## Modules
//!
//! - `lexicon`: polarity stems, aspect seed terms, tokenizer vocabulary
//! - `sentiment`: per-review scoring and exemplar selection
//! - `keywords`: aspect keyword ranking
//! - `engine`: [`LexiconAnalyzer`], the default analyzer

mod engine;
mod keywords;
mod lexicon;
mod sentiment;

pub use engine::LexiconAnalyzer;
pub use sentiment::{label_for, rating_score};

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::types::{AnalysisSummary, AspectSummary, KeywordSet, Result, ReviewTable};

/// Everything one analysis pass produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Input rows in input order with the sentiment column filled
    pub table: ReviewTable,
    pub keywords: KeywordSet,
    pub summary: AnalysisSummary,
    pub aspects: Vec<AspectSummary>,
}

/// Deterministic review analysis: identical tables give identical results
pub trait ReviewAnalyzer: Send + Sync {
    fn analyze(&self, table: &ReviewTable) -> Result<Analysis>;
}

pub fn create_analyzer(config: &AnalysisConfig) -> Box<dyn ReviewAnalyzer> {
    Box::new(LexiconAnalyzer::new(config))
}
