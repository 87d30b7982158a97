//! Aspect keyword ranking
//!
//! A token's score inside an aspect is its document frequency among the
//! reviews mentioning that aspect, scaled by how rare it is overall:
//! `df_aspect / mentions * ln(1 + N / df_global)`.

use std::collections::{BTreeMap, BTreeSet};

use super::lexicon::Lexicon;
use crate::types::Keyword;

/// Token sets per review plus global document frequencies
pub struct Corpus {
    docs: Vec<BTreeSet<String>>,
    df: BTreeMap<String, usize>,
    /// Reviews contributing at least one token
    populated: usize,
}

impl Corpus {
    pub fn build(lexicon: &Lexicon, lowered_texts: &[String]) -> Self {
        let docs: Vec<BTreeSet<String>> = lowered_texts
            .iter()
            .map(|text| lexicon.tokens(text).into_iter().collect())
            .collect();

        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in &docs {
            for token in doc {
                *df.entry(token.clone()).or_default() += 1;
            }
        }
        let populated = docs.iter().filter(|d| !d.is_empty()).count();

        Self { docs, df, populated }
    }

    /// Top `limit` keywords among the given review indices, score desc then word asc
    pub fn rank(&self, mentions: &[usize], limit: usize) -> Vec<Keyword> {
        if mentions.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut local: BTreeMap<&str, usize> = BTreeMap::new();
        for &idx in mentions {
            if let Some(doc) = self.docs.get(idx) {
                for token in doc {
                    *local.entry(token.as_str()).or_default() += 1;
                }
            }
        }

        let total = self.populated as f32;
        let mentioned = mentions.len() as f32;
        let mut ranked: Vec<Keyword> = local
            .into_iter()
            .map(|(word, local_df)| {
                let global_df = self.df.get(word).copied().unwrap_or(1) as f32;
                Keyword {
                    word: word.to_string(),
                    score: local_df as f32 / mentioned * (1.0 + total / global_df).ln(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Corpus {
        let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
        Corpus::build(&Lexicon::default(), &lowered)
    }

    fn words(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(|k| k.word.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_score_then_word() {
        let corpus = corpus(&["와퍼가 맛있어요", "와퍼 맛있고 감자튀김도 맛있어요", "직원이 친절해요"]);
        let ranked = corpus.rank(&[0, 1], 10);
        assert_eq!(words(&ranked), vec!["맛있어", "와퍼", "감자튀김", "맛있고"]);
        assert!((ranked[0].score - 2.5f32.ln()).abs() < 1e-5);
        assert!((ranked[2].score - 0.5 * 4f32.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_rank_limit() {
        let corpus = corpus(&["와퍼가 맛있어요", "와퍼 맛있고 감자튀김도 맛있어요"]);
        assert_eq!(corpus.rank(&[0, 1], 2).len(), 2);
        assert!(corpus.rank(&[0, 1], 0).is_empty());
    }

    #[test]
    fn test_rank_without_mentions_is_empty() {
        let corpus = corpus(&["와퍼가 맛있어요"]);
        assert!(corpus.rank(&[], 5).is_empty());
    }

    #[test]
    fn test_empty_texts_do_not_count() {
        let corpus = corpus(&["", "직원이 친절해요"]);
        let ranked = corpus.rank(&[1], 5);
        assert_eq!(words(&ranked), vec!["직원", "친절해"]);
        assert!((ranked[0].score - 2f32.ln()).abs() < 1e-5);
    }
}
