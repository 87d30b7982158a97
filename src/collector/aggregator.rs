//! Review Aggregator
//!
//! Queries every collector in fixed platform order and concatenates the
//! results. Results are memoized per restaurant name for the lifetime of the
//! aggregator, which the session owns: repeated submissions of the same name
//! never hit the network again.
//!
//! A failing collector fails the whole call and nothing is memoized for it.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::SharedCollector;
use crate::types::{RestaurantName, Result, Review};

pub struct Aggregator {
    collectors: Vec<SharedCollector>,
    cache: HashMap<RestaurantName, Arc<Vec<Review>>>,
    /// Collector calls made so far (cache hits don't count)
    invocations: usize,
}

impl Aggregator {
    /// Collectors are queried in the order given
    pub fn new(collectors: Vec<SharedCollector>) -> Self {
        Self {
            collectors,
            cache: HashMap::new(),
            invocations: 0,
        }
    }

    /// All reviews for `name`, source order preserved
    pub async fn collect_all(&mut self, name: &RestaurantName) -> Result<Arc<Vec<Review>>> {
        if let Some(cached) = self.cache.get(name) {
            debug!("Aggregator cache hit for '{}' ({} reviews)", name, cached.len());
            return Ok(Arc::clone(cached));
        }

        let mut all = Vec::new();
        for collector in &self.collectors {
            self.invocations += 1;
            let reviews = collector.collect(name).await?;
            debug!(
                "Collector {} returned {} reviews for '{}'",
                collector.platform(),
                reviews.len(),
                name
            );
            all.extend(reviews);
        }

        info!(
            "Aggregated {} reviews for '{}' from {} sources",
            all.len(),
            name,
            self.collectors.len()
        );

        let all = Arc::new(all);
        self.cache.insert(name.clone(), Arc::clone(&all));
        Ok(all)
    }

    /// Drop the memoized result for one name
    pub fn invalidate(&mut self, name: &RestaurantName) -> bool {
        self.cache.remove(name).is_some()
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub fn cached_names(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCollector, StubCollector};
    use crate::types::{Platform, ReviewError};

    fn name(s: &str) -> RestaurantName {
        RestaurantName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_concatenates_in_collector_order() {
        let kakao = StubCollector::with_reviews(Platform::Kakao, 2);
        let google = StubCollector::with_reviews(Platform::Google, 3);
        let naver = StubCollector::with_reviews(Platform::Naver, 1);
        let mut aggregator = Aggregator::new(vec![kakao.shared(), google.shared(), naver.shared()]);

        let reviews = aggregator.collect_all(&name("버거킹 연세로점")).await.unwrap();
        assert_eq!(reviews.len(), 6);

        let platforms: Vec<Platform> = reviews.iter().map(|r| r.platform).collect();
        assert_eq!(
            platforms,
            vec![
                Platform::Kakao,
                Platform::Kakao,
                Platform::Google,
                Platform::Google,
                Platform::Google,
                Platform::Naver
            ]
        );
    }

    #[tokio::test]
    async fn test_memoizes_per_name() {
        let kakao = StubCollector::with_reviews(Platform::Kakao, 2);
        let naver = StubCollector::with_reviews(Platform::Naver, 2);
        let mut aggregator = Aggregator::new(vec![kakao.shared(), naver.shared()]);

        aggregator.collect_all(&name("a")).await.unwrap();
        aggregator.collect_all(&name("a")).await.unwrap();
        aggregator.collect_all(&name(" a ")).await.unwrap();

        assert_eq!(kakao.calls(), 1);
        assert_eq!(naver.calls(), 1);
        assert_eq!(aggregator.invocations(), 2);

        aggregator.collect_all(&name("b")).await.unwrap();
        assert_eq!(kakao.calls(), 2);
        assert_eq!(aggregator.cached_names(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let kakao = StubCollector::with_reviews(Platform::Kakao, 1);
        let mut aggregator = Aggregator::new(vec![kakao.shared()]);

        aggregator.collect_all(&name("a")).await.unwrap();
        assert!(aggregator.invalidate(&name("a")));
        assert!(!aggregator.invalidate(&name("a")));
        aggregator.collect_all(&name("a")).await.unwrap();
        assert_eq!(kakao.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_returned_not_error() {
        let kakao = StubCollector::empty(Platform::Kakao);
        let mut aggregator = Aggregator::new(vec![kakao.shared()]);
        let reviews = aggregator.collect_all(&name("없는식당")).await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_failure_propagates_and_is_not_cached() {
        let kakao = StubCollector::with_reviews(Platform::Kakao, 2);
        let mut aggregator = Aggregator::new(vec![
            kakao.shared(),
            FailingCollector::shared(Platform::Google),
        ]);

        let err = aggregator.collect_all(&name("a")).await.unwrap_err();
        assert!(matches!(
            err,
            ReviewError::Collector {
                platform: Platform::Google,
                ..
            }
        ));
        assert_eq!(aggregator.cached_names(), 0);

        aggregator.collect_all(&name("a")).await.unwrap_err();
        assert_eq!(kakao.calls(), 2);
    }
}
