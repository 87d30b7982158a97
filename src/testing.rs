//! Test doubles shared by unit tests across modules

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::collector::{ReviewCollector, SharedCollector};
use crate::types::{Platform, RestaurantName, Result, Review, ReviewError};

/// Collector returning canned reviews and counting its calls
#[derive(Clone)]
pub struct StubCollector {
    platform: Platform,
    reviews: Arc<Vec<Review>>,
    calls: Arc<AtomicUsize>,
}

impl StubCollector {
    pub fn new(platform: Platform, reviews: Vec<Review>) -> Self {
        Self {
            platform,
            reviews: Arc::new(reviews),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `count` generic positive reviews
    pub fn with_reviews(platform: Platform, count: usize) -> Self {
        let reviews = (0..count)
            .map(|i| {
                review(
                    platform,
                    &format!("{}-user{}", platform, i),
                    "음식이 맛있고 직원이 친절해요",
                    Some(5.0),
                )
            })
            .collect();
        Self::new(platform, reviews)
    }

    pub fn empty(platform: Platform) -> Self {
        Self::new(platform, Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> SharedCollector {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl ReviewCollector for StubCollector {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn collect(&self, name: &RestaurantName) -> Result<Vec<Review>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .reviews
            .iter()
            .cloned()
            .map(|mut r| {
                r.restaurant_name = name.to_string();
                r
            })
            .collect())
    }
}

/// Collector that always fails
pub struct FailingCollector {
    platform: Platform,
}

impl FailingCollector {
    pub fn shared(platform: Platform) -> SharedCollector {
        Arc::new(Self { platform })
    }
}

#[async_trait]
impl ReviewCollector for FailingCollector {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn collect(&self, _name: &RestaurantName) -> Result<Vec<Review>> {
        Err(ReviewError::collector(self.platform, "HTTP 503 Service Unavailable"))
    }
}

pub fn review(platform: Platform, reviewer: &str, text: &str, rating: Option<f32>) -> Review {
    Review {
        platform,
        restaurant_name: "테스트식당".to_string(),
        reviewer: reviewer.to_string(),
        text: text.to_string(),
        rating,
        date: None,
    }
}
