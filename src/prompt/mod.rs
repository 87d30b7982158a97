//! Prompt Generation
//!
//! Two templates over the same analysis inputs: an owner-facing prompt asking
//! for operational recommendations, and a consumer-facing prompt asking for a
//! visit decision. Both are pure functions of [`PromptInput`].

mod builder;
mod consumer;
mod owner;

pub use builder::{PromptBuilder, PromptSection};
pub use consumer::consumer_prompt;
pub use owner::owner_prompt;

use crate::analysis::Analysis;
use crate::types::{AspectSummary, KeywordSet, Review, Role};

/// Everything a prompt template renders
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub name: &'a str,
    pub keywords: &'a KeywordSet,
    pub positive_ratio: f32,
    pub negative_ratio: f32,
    pub aspects: &'a [AspectSummary],
    pub top_positive: &'a [Review],
    pub top_negative: &'a [Review],
    pub classified_count: usize,
    /// Exemplar text is cut to this many characters
    pub exemplar_max_chars: usize,
}

impl<'a> PromptInput<'a> {
    pub fn from_analysis(name: &'a str, analysis: &'a Analysis, exemplar_max_chars: usize) -> Self {
        Self {
            name,
            keywords: &analysis.keywords,
            positive_ratio: analysis.summary.positive_ratio,
            negative_ratio: analysis.summary.negative_ratio,
            aspects: &analysis.aspects,
            top_positive: &analysis.summary.top_positive,
            top_negative: &analysis.summary.top_negative,
            classified_count: analysis.summary.classified_count,
            exemplar_max_chars,
        }
    }

    fn statistics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("식당", self.name.to_string()),
            ("분류된 리뷰 수", format!("{}건", self.classified_count)),
            ("긍정 비율", format!("{:.1}%", self.positive_ratio)),
            ("부정 비율", format!("{:.1}%", self.negative_ratio)),
        ]
    }

    fn aspect_lines(&self) -> Vec<String> {
        self.aspects
            .iter()
            .map(|a| format!("{}: {}", a.aspect, a.summary))
            .collect()
    }

    fn keyword_lines(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|group| {
                let rendered = KeywordSet::format_keywords(&group.keywords);
                if rendered.is_empty() {
                    format!("{}: (키워드 없음)", group.aspect)
                } else {
                    format!("{}: {}", group.aspect, rendered)
                }
            })
            .collect()
    }

    fn exemplar_lines(&self, reviews: &[Review]) -> Vec<String> {
        reviews
            .iter()
            .map(|r| {
                let source = match r.rating {
                    Some(rating) => format!("{} ★{:.1}", r.platform.label(), rating),
                    None => r.platform.label().to_string(),
                };
                format!("[{}] {}", source, truncate_chars(&r.text, self.exemplar_max_chars))
            })
            .collect()
    }
}

/// Render the template for `role`
pub fn build_prompt(role: Role, input: &PromptInput<'_>) -> String {
    match role {
        Role::Owner => owner_prompt(input),
        Role::Consumer => consumer_prompt(input),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
