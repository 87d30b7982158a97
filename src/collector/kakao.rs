//! Kakao Map collector
//!
//! Resolves the place through the map search endpoint, then walks the
//! comment list pages until `max_reviews` is reached or the list ends.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{
    PlaceHit, ReviewCollector, fetch_text, fill_template, normalize_text, parse_review_date,
};
use crate::config::KakaoConfig;
use crate::constants::collector::MAX_PAGES;
use crate::types::{Platform, RestaurantName, Result, Review, ReviewError};

const REFERER: &str = "https://map.kakao.com/";

pub struct KakaoCollector {
    client: reqwest::Client,
    config: KakaoConfig,
}

impl KakaoCollector {
    pub fn new(client: reqwest::Client, config: KakaoConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ReviewCollector for KakaoCollector {
    fn platform(&self) -> Platform {
        Platform::Kakao
    }

    async fn collect(&self, name: &RestaurantName) -> Result<Vec<Review>> {
        let search_url = fill_template(&self.config.search_url, &[("query", name.as_str())]);
        let body = fetch_text(&self.client, Platform::Kakao, &search_url, Some(REFERER)).await?;

        let Some(place) = parse_search(&body)? else {
            info!("[kakao] no place matched '{}'", name);
            return Ok(Vec::new());
        };
        debug!("[kakao] resolved '{}' to {} ({})", name, place.name, place.id);

        let mut reviews = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = fill_template(
                &self.config.comment_url,
                &[("id", place.id.as_str()), ("page", &page.to_string())],
            );
            let body = fetch_text(&self.client, Platform::Kakao, &url, Some(REFERER)).await?;
            let parsed = parse_comments(&body, &place.name)?;
            let page_len = parsed.reviews.len();
            reviews.extend(parsed.reviews);

            if !parsed.has_next || page_len == 0 || reviews.len() >= self.config.max_reviews {
                break;
            }
        }

        reviews.truncate(self.config.max_reviews);
        info!("[kakao] collected {} reviews for {}", reviews.len(), place.name);
        Ok(reviews)
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    place: Vec<SearchPlace>,
}

#[derive(Debug, Deserialize)]
struct SearchPlace {
    confirmid: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    #[serde(default)]
    comment: Option<CommentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentBlock {
    #[serde(default)]
    list: Vec<Comment>,
    #[serde(default)]
    has_next: bool,
}

#[derive(Debug, Deserialize)]
struct Comment {
    #[serde(default)]
    username: String,
    #[serde(default)]
    contents: String,
    #[serde(default)]
    point: Option<f32>,
    #[serde(default)]
    date: String,
}

/// One page of parsed comments
#[derive(Debug)]
pub struct CommentPage {
    pub reviews: Vec<Review>,
    pub has_next: bool,
}

/// First search hit, or `None` when the search returned no places
pub fn parse_search(body: &str) -> Result<Option<PlaceHit>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ReviewError::parse(Platform::Kakao, format!("search: {}", e)))?;

    Ok(response.place.into_iter().next().map(|p| PlaceHit {
        id: p.confirmid,
        name: p.name,
    }))
}

pub fn parse_comments(body: &str, restaurant_name: &str) -> Result<CommentPage> {
    let response: CommentResponse = serde_json::from_str(body)
        .map_err(|e| ReviewError::parse(Platform::Kakao, format!("comments: {}", e)))?;

    let Some(block) = response.comment else {
        return Ok(CommentPage {
            reviews: Vec::new(),
            has_next: false,
        });
    };

    let reviews = block
        .list
        .into_iter()
        .map(|c| Review {
            platform: Platform::Kakao,
            restaurant_name: restaurant_name.to_string(),
            reviewer: c.username,
            text: normalize_text(&c.contents),
            rating: c.point.filter(|p| *p > 0.0),
            date: parse_review_date(&c.date),
        })
        .collect();

    Ok(CommentPage {
        reviews,
        has_next: block.has_next,
    })
}
