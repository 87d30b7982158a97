//! Text rendering of a finished cycle

use crate::constants::display::REVIEW_TEXT_WIDTH;
use crate::session::Snapshot;
use crate::types::{AnalysisSummary, AspectSummary, KeywordSet, ReviewTable};

use super::output::Output;
use super::table::TextTable;

/// Every view of a ready cycle: tables, ratios, aspects, then the prompt
pub fn print_snapshot(out: &Output, snapshot: &Snapshot) {
    out.section(&format!("수집된 리뷰 ({}건)", snapshot.table.len()));
    println!("{}", review_table(&snapshot.table));

    out.section("플랫폼별 식당 이름");
    println!("{}", platform_table(snapshot));

    if let Some(keywords) = &snapshot.keywords {
        out.section("측면별 키워드");
        println!("{}", keyword_table(keywords));
    }

    out.section("감성 요약");
    println!("{}", ratio_line(&snapshot.summary));
    for line in aspect_lines(&snapshot.aspects) {
        println!("  {}", line);
    }

    out.section(&format!("생성된 프롬프트 ({})", snapshot.prompt_role.label()));
    if snapshot.prompt_reused {
        out.info("이전에 생성한 프롬프트를 재사용합니다.");
    }
    println!("{}", snapshot.prompt);
}

pub fn review_table(table: &ReviewTable) -> String {
    let mut out = TextTable::new(&["플랫폼", "식당 이름", "작성자", "평점", "감성", "날짜", "리뷰"])
        .with_caps(&[8, 20, 14, 4, 12, 10, REVIEW_TEXT_WIDTH]);

    for row in table.rows() {
        let review = &row.review;
        out.row(vec![
            review.platform.label().to_string(),
            review.restaurant_name.clone(),
            review.reviewer.clone(),
            review
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
            row.sentiment
                .map(|s| format!("{} {:+.2}", s.label.label(), s.score))
                .unwrap_or_else(|| "-".to_string()),
            review
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            review.text.clone(),
        ]);
    }
    out.render()
}

/// How each platform spelled the restaurant, with its review count
pub fn platform_table(snapshot: &Snapshot) -> String {
    let mut out = TextTable::new(&["플랫폼", "식당 이름", "리뷰 수"]).with_caps(&[8, 40, 8]);
    for (platform, name) in &snapshot.platform_names {
        out.row(vec![
            platform.label().to_string(),
            name.clone(),
            snapshot.table.count_by_platform(*platform).to_string(),
        ]);
    }
    out.render()
}

pub fn keyword_table(keywords: &KeywordSet) -> String {
    let mut out = TextTable::new(&["측면", "키워드"]).with_caps(&[8, 72]);
    for group in keywords.iter() {
        let rendered = KeywordSet::format_keywords(&group.keywords);
        out.row(vec![
            group.aspect.clone(),
            if rendered.is_empty() { "-".to_string() } else { rendered },
        ]);
    }
    out.render()
}

pub fn ratio_line(summary: &AnalysisSummary) -> String {
    format!(
        "긍정 {:.1}% / 부정 {:.1}% (분류된 리뷰 {}건)",
        summary.positive_ratio, summary.negative_ratio, summary.classified_count
    )
}

pub fn aspect_lines(aspects: &[AspectSummary]) -> Vec<String> {
    aspects
        .iter()
        .map(|a| format!("{}: {}", a.aspect, a.summary))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::review;
    use crate::types::{Platform, SentimentLabel, SentimentScore};

    #[test]
    fn test_review_table_rows() {
        let table = ReviewTable::from_reviews(vec![
            review(Platform::Kakao, "김**", "와퍼가 맛있어요", Some(5.0)),
            review(Platform::Naver, "nara", "", None),
        ])
        .with_sentiment(vec![
            Some(SentimentScore {
                label: SentimentLabel::Positive,
                score: 1.0,
            }),
            None,
        ]);

        let rendered = review_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("플랫폼"));
        assert!(lines[0].contains("식당 이름"));
        assert!(lines[2].contains("테스트식당"));
        assert!(lines[3].contains("테스트식당"));
        assert!(lines[2].contains("카카오맵"));
        assert!(lines[2].contains("긍정 +1.00"));
        assert!(lines[2].contains("와퍼가 맛있어요"));
        assert!(lines[3].contains("네이버"));
    }

    #[test]
    fn test_ratio_line() {
        let summary = AnalysisSummary {
            positive_ratio: 75.0,
            negative_ratio: 25.0,
            top_positive: Vec::new(),
            top_negative: Vec::new(),
            classified_count: 4,
        };
        assert_eq!(ratio_line(&summary), "긍정 75.0% / 부정 25.0% (분류된 리뷰 4건)");
    }
}
