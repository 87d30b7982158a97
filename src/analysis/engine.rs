use tracing::debug;

use super::keywords::Corpus;
use super::lexicon::Lexicon;
use super::sentiment::{score_review, select_exemplars};
use super::{Analysis, ReviewAnalyzer};
use crate::config::AnalysisConfig;
use crate::types::{
    AnalysisSummary, AspectKeywords, AspectSummary, Keyword, KeywordSet, Result, ReviewTable,
    SentimentLabel,
};

/// Keywords quoted in an aspect's one-line summary
const SUMMARY_KEYWORDS: usize = 3;

/// Lexicon and rating based analyzer
pub struct LexiconAnalyzer {
    lexicon: Lexicon,
    config: AnalysisConfig,
}

impl LexiconAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            lexicon: Lexicon::default(),
            config: config.clone(),
        }
    }
}

impl ReviewAnalyzer for LexiconAnalyzer {
    fn analyze(&self, table: &ReviewTable) -> Result<Analysis> {
        let lowered: Vec<String> = table.reviews().map(|r| r.text.to_lowercase()).collect();

        let scores = table
            .reviews()
            .zip(&lowered)
            .map(|(review, text)| {
                score_review(&self.lexicon, review, text, self.config.sentiment_threshold)
            })
            .collect();
        let table = table.with_sentiment(scores);

        let labels: Vec<Option<SentimentLabel>> = table
            .rows()
            .iter()
            .map(|row| row.sentiment.map(|s| s.label))
            .collect();
        let count_among = |indices: &[usize], label: SentimentLabel| {
            indices
                .iter()
                .filter(|&&idx| labels[idx] == Some(label))
                .count()
        };

        let all: Vec<usize> = (0..table.len()).collect();
        let positive = count_among(&all, SentimentLabel::Positive);
        let negative = count_among(&all, SentimentLabel::Negative);
        let (positive_ratio, negative_ratio) = AnalysisSummary::ratios(positive, negative);

        let corpus = Corpus::build(&self.lexicon, &lowered);
        let mut keyword_groups = Vec::new();
        let mut aspects = Vec::new();

        for aspect in self.lexicon.aspects() {
            let mentions: Vec<usize> = lowered
                .iter()
                .enumerate()
                .filter(|(_, text)| aspect.mentioned_in(text))
                .map(|(idx, _)| idx)
                .collect();

            let keywords = corpus.rank(&mentions, self.config.keywords_per_aspect);
            let aspect_pos = count_among(&mentions, SentimentLabel::Positive);
            let aspect_neg = count_among(&mentions, SentimentLabel::Negative);
            let (aspect_ratio, _) = AnalysisSummary::ratios(aspect_pos, aspect_neg);

            aspects.push(AspectSummary {
                aspect: aspect.name.to_string(),
                mentions: mentions.len(),
                positive: aspect_pos,
                negative: aspect_neg,
                positive_ratio: aspect_ratio,
                summary: summarize_aspect(mentions.len(), aspect_pos, aspect_neg, &keywords),
            });
            keyword_groups.push(AspectKeywords {
                aspect: aspect.name.to_string(),
                keywords,
            });
        }

        let summary = AnalysisSummary {
            positive_ratio,
            negative_ratio,
            top_positive: select_exemplars(
                &table,
                SentimentLabel::Positive,
                self.config.exemplar_count,
            ),
            top_negative: select_exemplars(
                &table,
                SentimentLabel::Negative,
                self.config.exemplar_count,
            ),
            classified_count: positive + negative,
        };

        debug!(
            "Analyzed {} reviews: {} positive, {} negative",
            table.len(),
            positive,
            negative
        );

        Ok(Analysis {
            table,
            keywords: KeywordSet::new(keyword_groups),
            summary,
            aspects,
        })
    }
}

fn summarize_aspect(mentions: usize, positive: usize, negative: usize, keywords: &[Keyword]) -> String {
    if mentions == 0 {
        return "언급 없음".to_string();
    }

    let (ratio, _) = AnalysisSummary::ratios(positive, negative);
    let top: Vec<&str> = keywords
        .iter()
        .take(SUMMARY_KEYWORDS)
        .map(|k| k.word.as_str())
        .collect();
    let top = if top.is_empty() {
        "-".to_string()
    } else {
        top.join(", ")
    };

    format!(
        "언급 {}건, 긍정 {:.1}% (긍정 {} / 부정 {}), 주요 키워드: {}",
        mentions, ratio, positive, negative, top
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::review;
    use crate::types::{Platform, Review};
    use proptest::prelude::*;

    fn analyze(reviews: Vec<Review>) -> Analysis {
        LexiconAnalyzer::new(&AnalysisConfig::default())
            .analyze(&ReviewTable::from_reviews(reviews))
            .unwrap()
    }

    fn sample() -> Vec<Review> {
        vec![
            review(Platform::Kakao, "김**", "와퍼가 맛있어요", Some(5.0)),
            review(Platform::Kakao, "이**", "와퍼 맛있고 감자튀김도 맛있어요", Some(4.0)),
            review(Platform::Google, "Kim", "직원이 불친절해요", Some(1.0)),
            review(Platform::Google, "Lee", "", Some(3.0)),
            review(Platform::Naver, "nara", "12시에 방문", None),
        ]
    }

    #[test]
    fn test_sentiment_column() {
        let analysis = analyze(sample());
        let labels: Vec<Option<SentimentLabel>> = analysis
            .table
            .rows()
            .iter()
            .map(|r| r.sentiment.map(|s| s.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                Some(SentimentLabel::Positive),
                Some(SentimentLabel::Positive),
                Some(SentimentLabel::Negative),
                Some(SentimentLabel::Neutral),
                None,
            ]
        );
        assert_eq!(analysis.table.len(), 5);
        assert_eq!(analysis.table.rows()[4].review.reviewer, "nara");
    }

    #[test]
    fn test_summary_ratios_and_exemplars() {
        let analysis = analyze(sample());
        let summary = &analysis.summary;
        assert_eq!(summary.classified_count, 3);
        assert!((summary.positive_ratio - 200.0 / 3.0).abs() < 1e-3);
        assert!((summary.positive_ratio + summary.negative_ratio - 100.0).abs() < 1e-3);

        assert_eq!(summary.top_positive.len(), 2);
        assert_eq!(summary.top_positive[0].reviewer, "김**");
        assert_eq!(summary.top_negative.len(), 1);
        assert_eq!(summary.top_negative[0].reviewer, "Kim");
    }

    #[test]
    fn test_keywords_cover_every_aspect() {
        let analysis = analyze(sample());
        let aspects: Vec<&str> = analysis.keywords.iter().map(|a| a.aspect.as_str()).collect();
        assert_eq!(aspects, vec!["맛", "서비스", "가격", "분위기", "위생"]);

        let taste: Vec<&str> = analysis
            .keywords
            .get("맛")
            .unwrap()
            .iter()
            .map(|k| k.word.as_str())
            .collect();
        assert_eq!(taste, vec!["맛있어", "와퍼", "감자튀김", "맛있고"]);
        assert!(analysis.keywords.get("가격").unwrap().is_empty());
    }

    #[test]
    fn test_aspect_summaries() {
        let analysis = analyze(sample());
        let service = analysis.aspects.iter().find(|a| a.aspect == "서비스").unwrap();
        assert_eq!(service.mentions, 1);
        assert_eq!(service.negative, 1);
        assert_eq!(service.positive_ratio, 0.0);
        assert!(service.summary.starts_with("언급 1건"));

        let price = analysis.aspects.iter().find(|a| a.aspect == "가격").unwrap();
        assert_eq!(price.mentions, 0);
        assert_eq!(price.summary, "언급 없음");
    }

    #[test]
    fn test_empty_table() {
        let analysis = analyze(Vec::new());
        assert!(analysis.table.is_empty());
        assert_eq!(analysis.summary.classified_count, 0);
        assert_eq!(analysis.summary.positive_ratio, 0.0);
        assert_eq!(analysis.summary.negative_ratio, 0.0);
        assert_eq!(analysis.keywords.len(), 5);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        assert_eq!(analyze(sample()), analyze(sample()));
    }

    proptest! {
        #[test]
        fn prop_summary_consistent_with_labels(
            ratings in proptest::collection::vec(proptest::option::of(1u8..=5), 0..40)
        ) {
            let reviews: Vec<Review> = ratings
                .iter()
                .map(|r| review(Platform::Kakao, "p", "", r.map(f32::from)))
                .collect();
            let analysis = analyze(reviews);

            let labelled = |label: SentimentLabel| analysis
                .table
                .rows()
                .iter()
                .filter(|r| r.sentiment.map(|s| s.label) == Some(label))
                .count();
            let pos = labelled(SentimentLabel::Positive);
            let neg = labelled(SentimentLabel::Negative);

            prop_assert_eq!(analysis.summary.classified_count, pos + neg);
            prop_assert!((0.0..=100.0).contains(&analysis.summary.positive_ratio));
            prop_assert!((0.0..=100.0).contains(&analysis.summary.negative_ratio));
            if pos + neg == 0 {
                prop_assert_eq!(analysis.summary.positive_ratio, 0.0);
            } else {
                prop_assert!(
                    (analysis.summary.positive_ratio + analysis.summary.negative_ratio - 100.0).abs() < 1e-3
                );
            }
        }
    }
}
