//! Google Places collector
//!
//! Uses the Places API: `findplacefromtext` to resolve the place id, then
//! `details` for its reviews. The API returns at most a handful of reviews
//! per place.
//!
//! Without an API key (config or GOOGLE_PLACES_API_KEY) the collector is
//! inert: it warns once per call and returns no reviews.

use async_trait::async_trait;
use chrono::DateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{PlaceHit, ReviewCollector, fetch_text, normalize_text};
use crate::config::{GoogleConfig, resolve_api_key};
use crate::types::{Platform, RestaurantName, Result, Review, ReviewError};

pub struct GoogleCollector {
    client: reqwest::Client,
    api_base: String,
    /// API key stored securely - never exposed in logs or debug output
    api_key: Option<SecretString>,
    language: String,
    max_reviews: usize,
}

impl std::fmt::Debug for GoogleCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCollector")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("language", &self.language)
            .field("max_reviews", &self.max_reviews)
            .finish()
    }
}

impl GoogleCollector {
    pub fn new(client: reqwest::Client, config: GoogleConfig) -> Self {
        let api_key =
            resolve_api_key(config.api_key, "GOOGLE_PLACES_API_KEY").map(SecretString::from);

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            language: config.language,
            max_reviews: config.max_reviews,
        }
    }

    fn find_place_url(&self, name: &str, key: &str) -> String {
        format!(
            "{}/findplacefromtext/json?input={}&inputtype=textquery&fields=place_id,name&language={}&key={}",
            self.api_base,
            urlencoding::encode(name),
            urlencoding::encode(&self.language),
            urlencoding::encode(key)
        )
    }

    fn details_url(&self, place_id: &str, key: &str) -> String {
        format!(
            "{}/details/json?place_id={}&fields=name,reviews&reviews_sort=newest&language={}&key={}",
            self.api_base,
            urlencoding::encode(place_id),
            urlencoding::encode(&self.language),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl ReviewCollector for GoogleCollector {
    fn platform(&self) -> Platform {
        Platform::Google
    }

    async fn collect(&self, name: &RestaurantName) -> Result<Vec<Review>> {
        let Some(api_key) = &self.api_key else {
            warn!("[google] no Places API key configured, skipping");
            return Ok(Vec::new());
        };
        let key = api_key.expose_secret();

        let body = fetch_text(
            &self.client,
            Platform::Google,
            &self.find_place_url(name.as_str(), key),
            None,
        )
        .await?;
        let Some(place) = parse_find_place(&body)? else {
            info!("[google] no place matched '{}'", name);
            return Ok(Vec::new());
        };
        debug!("[google] resolved '{}' to {} ({})", name, place.name, place.id);

        let body = fetch_text(
            &self.client,
            Platform::Google,
            &self.details_url(&place.id, key),
            None,
        )
        .await?;
        let mut reviews = parse_details(&body, &place.name)?;
        reviews.truncate(self.max_reviews);

        info!("[google] collected {} reviews for {}", reviews.len(), place.name);
        Ok(reviews)
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    place_id: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    reviews: Vec<PlaceReview>,
}

#[derive(Debug, Deserialize)]
struct PlaceReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    rating: Option<f32>,
    /// Unix seconds
    #[serde(default)]
    time: Option<i64>,
}

/// Map a non-OK Places status to an error; `ZERO_RESULTS` is not an error
fn check_status(status: &str, error_message: Option<String>) -> Result<bool> {
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        other => Err(ReviewError::collector(
            Platform::Google,
            match error_message {
                Some(msg) => format!("Places API status {}: {}", other, msg),
                None => format!("Places API status {}", other),
            },
        )),
    }
}

pub fn parse_find_place(body: &str) -> Result<Option<PlaceHit>> {
    let response: FindPlaceResponse = serde_json::from_str(body)
        .map_err(|e| ReviewError::parse(Platform::Google, format!("findplace: {}", e)))?;

    if !check_status(&response.status, response.error_message)? {
        return Ok(None);
    }

    Ok(response.candidates.into_iter().next().map(|c| PlaceHit {
        name: c.name.unwrap_or_default(),
        id: c.place_id,
    }))
}

/// Reviews from a details payload; the payload's own name wins over the search hit's
pub fn parse_details(body: &str, fallback_name: &str) -> Result<Vec<Review>> {
    let response: DetailsResponse = serde_json::from_str(body)
        .map_err(|e| ReviewError::parse(Platform::Google, format!("details: {}", e)))?;

    if !check_status(&response.status, response.error_message)? {
        return Ok(Vec::new());
    }

    let Some(details) = response.result else {
        return Ok(Vec::new());
    };

    let restaurant_name = details
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    Ok(details
        .reviews
        .into_iter()
        .map(|r| Review {
            platform: Platform::Google,
            restaurant_name: restaurant_name.clone(),
            reviewer: r.author_name,
            text: normalize_text(&r.text),
            rating: r.rating,
            date: r
                .time
                .and_then(|t| DateTime::from_timestamp(t, 0))
                .map(|dt| dt.date_naive()),
        })
        .collect())
}
