//! Per-review sentiment scoring and exemplar selection

use std::cmp::Ordering;

use super::lexicon::Lexicon;
use crate::constants::analysis::RATING_WEIGHT;
use crate::types::{Review, ReviewTable, SentimentLabel, SentimentScore};

/// Star rating mapped onto [-1, 1]; 3 stars is neutral
pub fn rating_score(rating: f32) -> f32 {
    ((rating - 3.0) / 2.0).clamp(-1.0, 1.0)
}

pub fn label_for(score: f32, threshold: f32) -> SentimentLabel {
    if score >= threshold {
        SentimentLabel::Positive
    } else if score <= -threshold {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Combine rating and text signals; `None` when the review carries neither
pub fn score_review(
    lexicon: &Lexicon,
    review: &Review,
    lowered_text: &str,
    threshold: f32,
) -> Option<SentimentScore> {
    let from_rating = review.rating.map(rating_score);
    let from_text = lexicon.polarity(lowered_text).score();

    let score = match (from_rating, from_text) {
        (Some(r), Some(t)) => RATING_WEIGHT * r + (1.0 - RATING_WEIGHT) * t,
        (Some(r), None) => r,
        (None, Some(t)) => t,
        (None, None) => return None,
    };

    Some(SentimentScore {
        label: label_for(score, threshold),
        score,
    })
}

/// Strongest reviews of one polarity that have text to quote
///
/// Positive exemplars sort by score descending, negative ones ascending;
/// ties keep table order.
pub fn select_exemplars(table: &ReviewTable, label: SentimentLabel, count: usize) -> Vec<Review> {
    let mut candidates: Vec<(usize, f32)> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.review.has_text())
        .filter_map(|(idx, row)| {
            row.sentiment
                .filter(|s| s.label == label)
                .map(|s| (idx, s.score))
        })
        .collect();

    candidates.sort_by(|a, b| {
        let by_score = match label {
            SentimentLabel::Negative => a.1.total_cmp(&b.1),
            _ => b.1.total_cmp(&a.1),
        };
        match by_score {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        }
    });

    candidates
        .into_iter()
        .take(count)
        .map(|(idx, _)| table.rows()[idx].review.clone())
        .collect()
}
