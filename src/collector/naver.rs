//! Naver Map collector
//!
//! The place search endpoint answers JSON; the visitor review page is HTML
//! and is read with CSS selectors. Naver visitor reviews carry no star
//! rating, so every review from this source has `rating: None`.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{
    PlaceHit, ReviewCollector, fetch_text, fill_template, normalize_text, parse_review_date,
};
use crate::config::NaverConfig;
use crate::types::{Platform, RestaurantName, Result, Review, ReviewError};

const REFERER: &str = "https://map.naver.com/";

/// Review list item and its parts on the mobile visitor review page
mod selectors {
    pub const ITEM: &str = "li.place_apply_pui";
    pub const AUTHOR: &str = ".pui__NMi-Dp";
    pub const BODY: &str = ".pui__vn15t2";
    pub const DATE: &str = "time";
    pub const PLACE_NAME: &str = "#_title span.GHAhO, #_title .Fc1rA";
}

pub struct NaverCollector {
    client: reqwest::Client,
    config: NaverConfig,
}

impl NaverCollector {
    pub fn new(client: reqwest::Client, config: NaverConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ReviewCollector for NaverCollector {
    fn platform(&self) -> Platform {
        Platform::Naver
    }

    async fn collect(&self, name: &RestaurantName) -> Result<Vec<Review>> {
        let search_url = fill_template(&self.config.search_url, &[("query", name.as_str())]);
        let body = fetch_text(&self.client, Platform::Naver, &search_url, Some(REFERER)).await?;

        let Some(place) = parse_search(&body)? else {
            info!("[naver] no place matched '{}'", name);
            return Ok(Vec::new());
        };
        debug!("[naver] resolved '{}' to {} ({})", name, place.name, place.id);

        let review_url = fill_template(&self.config.review_url, &[("id", place.id.as_str())]);
        let html = fetch_text(&self.client, Platform::Naver, &review_url, Some(REFERER)).await?;

        let mut reviews = parse_review_page(&html, &place.name)?;
        if reviews.is_empty() {
            warn!("[naver] review page for {} had no recognizable items", place.id);
        }
        reviews.truncate(self.config.max_reviews);

        info!("[naver] collected {} reviews for {}", reviews.len(), place.name);
        Ok(reviews)
    }
}

// =============================================================================
// Search Payload
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    place: Option<PlaceList>,
}

#[derive(Debug, Deserialize)]
struct PlaceList {
    #[serde(default)]
    list: Vec<SearchPlace>,
}

#[derive(Debug, Deserialize)]
struct SearchPlace {
    id: String,
    name: String,
}

pub fn parse_search(body: &str) -> Result<Option<PlaceHit>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ReviewError::parse(Platform::Naver, format!("search: {}", e)))?;

    Ok(response
        .result
        .and_then(|r| r.place)
        .and_then(|p| p.list.into_iter().next())
        .map(|p| PlaceHit {
            id: p.id,
            name: p.name,
        }))
}

// =============================================================================
// Review Page
// =============================================================================

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ReviewError::parse(Platform::Naver, format!("selector '{}': {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

/// Parse the visitor review page.
///
/// The place name printed on the page wins over the search hit's name.
pub fn parse_review_page(html: &str, fallback_name: &str) -> Result<Vec<Review>> {
    let document = Html::parse_document(html);

    let item_sel = selector(selectors::ITEM)?;
    let author_sel = selector(selectors::AUTHOR)?;
    let body_sel = selector(selectors::BODY)?;
    let date_sel = selector(selectors::DATE)?;
    let name_sel = selector(selectors::PLACE_NAME)?;

    let restaurant_name = document
        .select(&name_sel)
        .next()
        .map(element_text)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    let reviews = document
        .select(&item_sel)
        .map(|item| {
            let reviewer = item
                .select(&author_sel)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let text = item
                .select(&body_sel)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let date = item
                .select(&date_sel)
                .next()
                .and_then(|t| parse_review_date(&element_text(t)));

            Review {
                platform: Platform::Naver,
                restaurant_name: restaurant_name.clone(),
                reviewer,
                text,
                rating: None,
                date,
            }
        })
        .filter(|r| !r.reviewer.is_empty() || r.has_text())
        .collect();

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const REVIEW_PAGE: &str = r#"
        <html><body>
          <div id="_title"><span class="GHAhO">버거킹 신촌연세로점</span></div>
          <ul>
            <li class="place_apply_pui">
              <span class="pui__NMi-Dp">맛집탐방러</span>
              <div class="pui__vn15t2"><a>직원분들이 친절하고
                 감자튀김이 바삭해요</a></div>
              <div><time aria-hidden="true">24.3.15.금</time></div>
            </li>
            <li class="place_apply_pui">
              <span class="pui__NMi-Dp">nara</span>
              <div class="pui__vn15t2">너무 짜고 불친절했어요</div>
              <time>2024.02.01.</time>
            </li>
            <li class="place_apply_pui"></li>
          </ul>
        </body></html>"#;

    #[test]
    fn test_parse_search() {
        let body = r#"{"result":{"place":{"totalCount":1,"list":[{"id":"1234567","name":"버거킹 신촌연세로점"}]}}}"#;
        let hit = parse_search(body).unwrap().unwrap();
        assert_eq!(hit.id, "1234567");
    }

    #[test]
    fn test_parse_search_empty() {
        assert_eq!(parse_search(r#"{"result":{"place":null}}"#).unwrap(), None);
        assert_eq!(parse_search(r#"{"result":null}"#).unwrap(), None);
        assert!(parse_search("not json").is_err());
    }

    #[test]
    fn test_parse_review_page() {
        let reviews = parse_review_page(REVIEW_PAGE, "fallback").unwrap();
        assert_eq!(reviews.len(), 2);

        assert_eq!(reviews[0].restaurant_name, "버거킹 신촌연세로점");
        assert_eq!(reviews[0].reviewer, "맛집탐방러");
        assert_eq!(reviews[0].text, "직원분들이 친절하고 감자튀김이 바삭해요");
        assert_eq!(reviews[0].date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(reviews[0].rating, None);

        assert_eq!(reviews[1].reviewer, "nara");
        assert_eq!(reviews[1].date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_parse_review_page_without_title_uses_fallback() {
        let html = r#"<ul><li class="place_apply_pui"><div class="pui__vn15t2">굿</div></li></ul>"#;
        let reviews = parse_review_page(html, "버거킹").unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].restaurant_name, "버거킹");
        assert_eq!(reviews[0].reviewer, "");
    }

    #[test]
    fn test_parse_review_page_no_items() {
        assert!(parse_review_page("<html></html>", "x").unwrap().is_empty());
    }
}
