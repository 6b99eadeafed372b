// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::services::backend::{BackendError, ContentBackend};
use crate::services::logging::redact_secret;
use crate::services::query::ObjectQuery;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.cosmicjs.com/v3";

/// Connection settings for a Cosmic bucket
#[derive(Debug, Clone)]
pub struct CosmicConfig {
    pub api_url: String,
    pub bucket_slug: String,
    pub read_key: String,
    /// Not used by any read path; kept so the whole bucket identity travels together
    pub write_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ObjectsResponse {
    #[serde(default)]
    objects: Vec<Value>,
}

/// REST client for the Cosmic objects API
pub struct CosmicClient {
    http: reqwest::Client,
    objects_url: Url,
    read_key: String,
}

impl CosmicClient {
    pub fn new(config: &CosmicConfig) -> Result<Self, BackendError> {
        let mut objects_url = Url::parse(&config.api_url)?;
        objects_url
            .path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["buckets", config.bucket_slug.as_str(), "objects"]);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("search-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            bucket = %config.bucket_slug,
            read_key = %redact_secret(&config.read_key),
            "Configured Cosmic bucket at {}",
            config.api_url
        );

        Ok(Self {
            http,
            objects_url,
            read_key: config.read_key.clone(),
        })
    }

    /// Full request URL for `query`, including the read key.
    pub fn request_url(&self, query: &ObjectQuery) -> Result<Url, BackendError> {
        let filter = serde_json::to_string(&query.to_filter_json())?;

        let mut url = self.objects_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("read_key", &self.read_key);
            pairs.append_pair("query", &filter);
            if !query.requested_props().is_empty() {
                pairs.append_pair("props", &query.requested_props().join(","));
            }
            if query.expansion_depth() > 0 {
                pairs.append_pair("depth", &query.expansion_depth().to_string());
            }
            if let Some(limit) = query.max_results() {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ContentBackend for CosmicClient {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, BackendError> {
        let url = self.request_url(query)?;
        debug!(
            object_type = query.object_type(),
            constraints = query.constraints().len(),
            "Querying Cosmic objects"
        );

        // reqwest errors carry the request URL, which holds the read key
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.without_url()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(object_type = query.object_type(), "Cosmic found no objects");
            return Err(BackendError::NotFound);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Http(e.without_url()))?;
        let parsed: ObjectsResponse = serde_json::from_slice(&body)?;
        debug!(count = parsed.objects.len(), "Cosmic returned objects");

        Ok(parsed.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::{SearchFilters, SearchStatus};
    use crate::services::query::build_query;
    use std::collections::HashMap;

    fn client(api_url: &str) -> CosmicClient {
        CosmicClient::new(&CosmicConfig {
            api_url: api_url.to_string(),
            bucket_slug: "web-search".to_string(),
            read_key: "read-123".to_string(),
            write_key: None,
            timeout: Duration::from_secs(5),
        })
        .expect("Failed to build client")
    }

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_request_url_encodes_query_document() {
        let filters = SearchFilters::with_status(SearchStatus::Active);
        let url = client(DEFAULT_API_URL)
            .request_url(&build_query(&filters))
            .unwrap();

        assert_eq!(url.path(), "/v3/buckets/web-search/objects");

        let params = params(&url);
        assert_eq!(params["read_key"], "read-123");
        assert_eq!(params["props"], "id,title,slug,metadata");
        assert_eq!(params["depth"], "1");
        assert!(!params.contains_key("limit"));

        let doc: Value = serde_json::from_str(&params["query"]).unwrap();
        assert_eq!(
            doc,
            serde_json::json!({ "type": "search-results", "metadata.status.key": "active" })
        );
    }

    #[test]
    fn test_request_url_trims_trailing_slash_and_adds_limit() {
        let query = ObjectQuery::of_type("search-results").limit(1);
        let url = client("http://127.0.0.1:9/v3/").request_url(&query).unwrap();

        assert_eq!(url.path(), "/v3/buckets/web-search/objects");
        let params = params(&url);
        assert_eq!(params["limit"], "1");
        assert!(!params.contains_key("props"));
        assert!(!params.contains_key("depth"));
    }

    #[test]
    fn test_bucket_slug_is_one_path_segment() {
        let client = CosmicClient::new(&CosmicConfig {
            api_url: DEFAULT_API_URL.to_string(),
            bucket_slug: "web search/../x?y".to_string(),
            read_key: "k".to_string(),
            write_key: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        let url = client
            .request_url(&ObjectQuery::of_type("search-results"))
            .unwrap();

        assert_eq!(url.path(), "/v3/buckets/web%20search%2F..%2Fx%3Fy/objects");
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let result = CosmicClient::new(&CosmicConfig {
            api_url: "not a url".to_string(),
            bucket_slug: "b".to_string(),
            read_key: "k".to_string(),
            write_key: None,
            timeout: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
    }
}
