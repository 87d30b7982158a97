//! Review Collectors
//!
//! One collector per platform. Each resolves a restaurant name to a place on
//! the platform and returns that place's reviews in the platform's own order.
//!
//! Fetching and parsing are kept apart: every collector exposes pure
//! `parse_*` functions over the raw response body, so the parsers are tested
//! offline against captured payloads.
//!
//! ## Modules
//!
//! - `aggregator`: fixed-order fan-out with per-session memoization
//! - `kakao`, `google`, `naver`: platform implementations

mod aggregator;
mod google;
mod kakao;
mod naver;

pub use aggregator::Aggregator;
pub use google::GoogleCollector;
pub use kakao::KakaoCollector;
pub use naver::NaverCollector;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::debug;

use crate::config::CollectorsConfig;
use crate::constants::collector::{ACCEPT_LANGUAGE, MAX_REDIRECTS};
use crate::types::{Platform, RestaurantName, Result, ResultExt, Review, ReviewError};

/// Source of reviews for one platform
#[async_trait]
pub trait ReviewCollector: Send + Sync {
    /// Platform this collector reads
    fn platform(&self) -> Platform;

    /// Fetch reviews for a restaurant; an unknown restaurant yields an empty list
    async fn collect(&self, name: &RestaurantName) -> Result<Vec<Review>>;
}

pub type SharedCollector = Arc<dyn ReviewCollector>;

/// A place resolved from a platform search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceHit {
    pub id: String,
    pub name: String,
}

/// Build collectors for the enabled platforms, always in kakao, google, naver order
pub fn create_collectors(config: &CollectorsConfig) -> Result<Vec<SharedCollector>> {
    let client = http_client(config)?;
    let mut collectors: Vec<SharedCollector> = Vec::new();

    for platform in Platform::ALL {
        if !config.enabled.contains(&platform) {
            debug!("Collector {} disabled by config", platform);
            continue;
        }
        let collector: SharedCollector = match platform {
            Platform::Kakao => Arc::new(KakaoCollector::new(client.clone(), config.kakao.clone())),
            Platform::Google => {
                Arc::new(GoogleCollector::new(client.clone(), config.google.clone()))
            }
            Platform::Naver => Arc::new(NaverCollector::new(client.clone(), config.naver.clone())),
        };
        collectors.push(collector);
    }

    Ok(collectors)
}

/// Shared HTTP client with browser-like headers
pub fn http_client(config: &CollectorsConfig) -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| ReviewError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// GET a URL and return the body, treating non-2xx as a collector failure
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    platform: Platform,
    url: &str,
    referer: Option<&str>,
) -> Result<String> {
    debug!("[{}] GET {}", platform, url);

    let mut request = client.get(url);
    if let Some(referer) = referer {
        request = request.header(reqwest::header::REFERER, referer);
    }

    let response = request.send().await.for_platform(platform)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ReviewError::collector(
            platform,
            format!("HTTP {} for {}", status, url),
        ));
    }

    response.text().await.for_platform(platform)
}

/// Substitute `{key}` placeholders; `query` values are percent-encoded
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        let placeholder = format!("{{{}}}", key);
        let replacement = if *key == "query" {
            urlencoding::encode(value).into_owned()
        } else {
            (*value).to_string()
        };
        out = out.replace(&placeholder, &replacement);
    }
    out
}

static DOTTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2,4})[.\-/]\s*(\d{1,2})[.\-/]\s*(\d{1,2})").expect("static regex")
});

/// Parse the date spellings the platforms use: `2024.03.15.`, `24.3.15.월`, `2024-03-15`
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let caps = DOTTED_DATE.captures(raw)?;
    let mut year: i32 = caps[1].parse().ok()?;
    if caps[1].len() == 2 {
        year += 2000;
    } else if caps[1].len() != 4 {
        return None;
    }
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Collapse runs of whitespace and trim
pub(crate) fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_review_date("2024.03.15."), expected);
        assert_eq!(parse_review_date("24.3.15.금"), expected);
        assert_eq!(parse_review_date("2024-03-15"), expected);
        assert_eq!(parse_review_date("방문일 2024. 3. 15"), expected);
    }

    #[test]
    fn test_parse_review_date_rejects_garbage() {
        assert_eq!(parse_review_date(""), None);
        assert_eq!(parse_review_date("어제"), None);
        assert_eq!(parse_review_date("2024.13.40."), None);
        assert_eq!(parse_review_date("123.1.1"), None);
    }

    #[test]
    fn test_fill_template_encodes_query() {
        let url = fill_template(
            "https://example.com/search?q={query}&page={page}",
            &[("query", "버거킹 연세로점"), ("page", "2")],
        );
        assert!(url.starts_with("https://example.com/search?q=%EB%B2%84"));
        assert!(url.contains("%20"));
        assert!(url.ends_with("&page=2"));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  맛있어요\n\n또 올게요\t "), "맛있어요 또 올게요");
    }

    #[test]
    fn test_create_collectors_respects_order_and_enabled() {
        let mut config = CollectorsConfig::default();
        config.enabled = vec![Platform::Naver, Platform::Kakao];
        let collectors = create_collectors(&config).unwrap();
        let platforms: Vec<Platform> = collectors.iter().map(|c| c.platform()).collect();
        assert_eq!(platforms, vec![Platform::Kakao, Platform::Naver]);
    }
}
