// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::{SearchFilters, SearchResult, SearchStatus};
use crate::models::stats::Stats;
use crate::services::backend::{BackendError, ContentBackend};
use crate::services::query::{
    build_query, Constraint, ObjectQuery, DOMAIN_PATH, RESULT_PROPS, RESULT_TYPE, SLUG_PATH,
};
use crate::services::sort::sort_results;
use futures::future::try_join3;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SearchError {
    /// Any backend failure other than "not found"
    #[error("Failed to fetch {what}")]
    FetchFailure {
        what: &'static str,
        #[source]
        source: BackendError,
    },
}

impl SearchError {
    fn fetch(what: &'static str, source: BackendError) -> Self {
        SearchError::FetchFailure { what, source }
    }
}

/// Everything the landing page shows, loaded in one round
#[derive(Debug, Clone)]
pub struct HomeSnapshot {
    pub results: Vec<SearchResult>,
    pub domains: Vec<String>,
    pub stats: Stats,
}

/// Application-level access to indexed pages.
///
/// Backend "not found" signals are recovered here and turned into empty
/// lists or `None`; every other backend failure becomes
/// [`SearchError::FetchFailure`].
#[derive(Clone)]
pub struct SearchService {
    backend: Arc<dyn ContentBackend>,
}

impl SearchService {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// Filtered and sorted results.
    pub async fn list_results(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = build_query(filters);
        let objects = match self.backend.find(&query).await {
            Ok(objects) => objects,
            Err(BackendError::NotFound) => return Ok(Vec::new()),
            Err(e) => return Err(SearchError::fetch("search results", e)),
        };

        let results = decode_results(objects);
        debug!(count = results.len(), "Listed search results");

        Ok(sort_results(&results, filters.sort_by, filters.sort_order))
    }

    /// Exact lookup by slug. Records without metadata count as missing.
    pub async fn get_result(&self, slug: &str) -> Result<Option<SearchResult>, SearchError> {
        let Ok(by_slug) = Constraint::equals(SLUG_PATH, slug) else {
            return Ok(None);
        };
        let query = ObjectQuery::of_type(RESULT_TYPE)
            .with(by_slug)
            .props(RESULT_PROPS)
            .depth(1);

        let object = match self.backend.find_one(&query).await {
            Ok(object) => object,
            Err(BackendError::NotFound) => return Ok(None),
            Err(e) => return Err(SearchError::fetch("search result", e)),
        };

        let result: SearchResult = serde_json::from_value(object)
            .map_err(|e| SearchError::fetch("search result", BackendError::Decode(e)))?;

        if result.metadata.is_empty() {
            debug!(slug, "Search result has no metadata");
            return Ok(None);
        }
        Ok(Some(result))
    }

    /// Distinct domains across all results, ascending.
    pub async fn list_domains(&self) -> Result<Vec<String>, SearchError> {
        let query = ObjectQuery::of_type(RESULT_TYPE).props(&[DOMAIN_PATH]);
        let objects = match self.backend.find(&query).await {
            Ok(objects) => objects,
            Err(BackendError::NotFound) => return Ok(Vec::new()),
            Err(e) => return Err(SearchError::fetch("available domains", e)),
        };

        let domains: BTreeSet<String> = objects
            .iter()
            .filter_map(|object| object.pointer("/metadata/domain").and_then(Value::as_str))
            .filter(|domain| !domain.trim().is_empty())
            .map(str::to_string)
            .collect();

        Ok(domains.into_iter().collect())
    }

    /// Counts per status, queried concurrently.
    ///
    /// Best effort: if any status query fails, all counts are zero and the
    /// returned stats are marked degraded.
    pub async fn get_stats(&self) -> Stats {
        let [active, pending, blocked] = SearchStatus::ALL.map(|status| self.count_status(status));

        match try_join3(active, pending, blocked).await {
            Ok((active, pending, blocked)) => Stats::new(active, pending, blocked),
            Err(e) => {
                warn!(error = ?e, "Error fetching results stats");
                Stats::degraded()
            }
        }
    }

    /// Results, domains and stats for the landing page, fetched concurrently.
    /// Stats degrade on their own; the other two fail the load.
    pub async fn load_home(&self, filters: &SearchFilters) -> Result<HomeSnapshot, SearchError> {
        let (results, domains, stats) = futures::join!(
            self.list_results(filters),
            self.list_domains(),
            self.get_stats()
        );

        Ok(HomeSnapshot {
            results: results?,
            domains: domains?,
            stats,
        })
    }

    async fn count_status(&self, status: SearchStatus) -> Result<usize, SearchError> {
        self.list_results(&SearchFilters::with_status(status))
            .await
            .map(|results| results.len())
    }
}

/// Decode raw objects, skipping any that do not have the result shape.
fn decode_results(objects: Vec<Value>) -> Vec<SearchResult> {
    objects
        .into_iter()
        .filter_map(|object| match serde_json::from_value::<SearchResult>(object) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(error = %e, "Skipping malformed search result");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::{SortBy, SortOrder};
    use crate::services::backend::MemoryBackend;
    use crate::services::query::STATUS_PATH;
    use async_trait::async_trait;
    use serde_json::json;

    fn page(slug: &str, domain: &str, status: &str, ranking: f64) -> Value {
        json!({
            "id": format!("id-{slug}"),
            "slug": slug,
            "type": RESULT_TYPE,
            "title": format!("Title {slug}"),
            "metadata": {
                "domain": domain,
                "search_ranking": ranking,
                "status": { "key": status, "value": status },
            },
        })
    }

    fn service(objects: Vec<Value>) -> SearchService {
        SearchService::new(Arc::new(MemoryBackend::new(objects)))
    }

    /// Fails every query carrying the given status constraint
    struct FailingStatus(&'static str);

    #[async_trait]
    impl ContentBackend for FailingStatus {
        async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, BackendError> {
            let failing = Constraint::equals(STATUS_PATH, self.0).unwrap();
            if query.constraints().contains(&failing) {
                return Err(BackendError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(vec![page("ok", "a.com", "active", 1.0)])
        }
    }

    /// Fails every query
    struct Broken;

    #[async_trait]
    impl ContentBackend for Broken {
        async fn find(&self, _query: &ObjectQuery) -> Result<Vec<Value>, BackendError> {
            Err(BackendError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_list_results_filters_and_sorts() {
        let service = service(vec![
            page("low", "a.com", "active", 10.0),
            page("high", "a.com", "active", 90.0),
            page("mid", "b.com", "active", 40.0),
            page("hidden", "a.com", "blocked", 99.0),
        ]);

        let filters = SearchFilters::with_status(SearchStatus::Active);
        let results = service.list_results(&filters).await.unwrap();
        let slugs: Vec<_> = results.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["high", "mid", "low"]);

        let filters = SearchFilters {
            domain: Some("a.com".to_string()),
            sort_order: SortOrder::Asc,
            ..SearchFilters::default()
        };
        let results = service.list_results(&filters).await.unwrap();
        let slugs: Vec<_> = results.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["low", "high", "hidden"]);
    }

    #[tokio::test]
    async fn test_list_results_not_found_is_empty() {
        let service = service(vec![page("one", "a.com", "active", 1.0)]);
        let filters = SearchFilters {
            query: Some("nothing matches this".to_string()),
            sort_by: SortBy::Date,
            ..SearchFilters::default()
        };

        assert!(service.list_results(&filters).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_results_backend_failure_is_fetch_failure() {
        let service = SearchService::new(Arc::new(Broken));
        let err = service
            .list_results(&SearchFilters::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch search results");
        assert!(matches!(
            err,
            SearchError::FetchFailure {
                source: BackendError::Status { status: 500, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_objects_are_skipped() {
        let service = service(vec![
            page("good", "a.com", "active", 1.0),
            json!({ "type": RESULT_TYPE, "slug": "no-id-or-title" }),
        ]);

        let results = service.list_results(&SearchFilters::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "good");
    }

    #[tokio::test]
    async fn test_get_result_by_slug() {
        let service = service(vec![
            page("one", "a.com", "active", 1.0),
            page("two", "b.com", "pending", 2.0),
        ]);

        let result = service.get_result("two").await.unwrap().unwrap();
        assert_eq!(result.id, "id-two");
        assert_eq!(result.metadata.domain.as_deref(), Some("b.com"));
    }

    #[tokio::test]
    async fn test_get_result_missing_slug_is_none() {
        let service = service(vec![page("one", "a.com", "active", 1.0)]);
        assert!(service.get_result("missing").await.unwrap().is_none());
        assert!(service.get_result("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_result_without_metadata_is_none() {
        let service = service(vec![
            json!({ "id": "1", "slug": "empty", "type": RESULT_TYPE, "title": "E", "metadata": {} }),
            json!({ "id": "2", "slug": "null", "type": RESULT_TYPE, "title": "N", "metadata": null }),
        ]);

        assert!(service.get_result("empty").await.unwrap().is_none());
        assert!(service.get_result("null").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_result_backend_failure_is_error() {
        let service = SearchService::new(Arc::new(Broken));
        assert!(service.get_result("any").await.is_err());
    }

    #[tokio::test]
    async fn test_list_domains_dedupes_and_sorts() {
        let service = service(vec![
            page("1", "b.com", "active", 1.0),
            page("2", "a.com", "active", 1.0),
            page("3", "a.com", "blocked", 1.0),
            json!({ "id": "4", "slug": "4", "type": RESULT_TYPE, "title": "x", "metadata": {} }),
        ]);

        assert_eq!(service.list_domains().await.unwrap(), vec!["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn test_list_domains_empty_catalog() {
        assert!(service(Vec::new()).list_domains().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_count_each_status() {
        let service = service(vec![
            page("1", "a.com", "active", 1.0),
            page("2", "a.com", "active", 1.0),
            page("3", "a.com", "pending", 1.0),
        ]);

        assert_eq!(service.get_stats().await, Stats::new(2, 1, 0));
    }

    #[tokio::test]
    async fn test_stats_degrade_to_zero_when_one_query_fails() {
        let service = SearchService::new(Arc::new(FailingStatus("pending")));
        let stats = service.get_stats().await;

        assert_eq!(
            (stats.active, stats.pending, stats.blocked, stats.total),
            (0, 0, 0, 0)
        );
        assert!(stats.degraded);
    }

    #[tokio::test]
    async fn test_load_home_combines_all_parts() {
        let service = service(vec![
            page("1", "b.com", "active", 5.0),
            page("2", "a.com", "pending", 9.0),
        ]);

        let home = service
            .load_home(&SearchFilters::with_status(SearchStatus::Active))
            .await
            .unwrap();

        assert_eq!(home.results.len(), 1);
        assert_eq!(home.domains, vec!["a.com", "b.com"]);
        assert_eq!(home.stats, Stats::new(1, 1, 0));
    }

    #[tokio::test]
    async fn test_load_home_fails_when_results_fail() {
        let service = SearchService::new(Arc::new(Broken));
        assert!(service.load_home(&SearchFilters::default()).await.is_err());
    }
}
