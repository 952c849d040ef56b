use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::SearchError;
use crate::mode::Mode;
use crate::payload::ChatModel;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub mode: Mode,
}

/// Client for the upstream search aggregation service. Successful responses
/// are memoized per `(query, mode)` for the configured TTL.
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    chat_model: ChatModel,
    cache: TtlCache<CacheKey, Value>,
}

impl SearchClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.upstream_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }

    /// Parses `mode` and fetches. An unknown mode fails before any request.
    pub async fn fetch_by_name(&self, query: &str, mode: &str) -> Result<Value, SearchError> {
        let mode: Mode = mode.parse()?;
        self.fetch(query, mode).await
    }

    /// Returns the upstream JSON body for `query` in `mode`, from cache when a
    /// live entry exists.
    pub async fn fetch(&self, query: &str, mode: Mode) -> Result<Value, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let key = CacheKey {
            query: query.to_string(),
            mode,
        };
        self.cache
            .get_or_try_insert_with(key, || self.fetch_uncached(query, mode))
            .await
    }

    #[instrument(skip(self, mode), fields(mode = %mode))]
    async fn fetch_uncached(&self, query: &str, mode: Mode) -> Result<Value, SearchError> {
        let url = mode.endpoint(&self.base_url);
        let payload = mode.payload(query, &self.chat_model);

        debug!(url = %url, "sending search request upstream");

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "network error during upstream request");
                SearchError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "upstream returned an error status");
            return Err(SearchError::RequestFailed {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "failed to read upstream response body");
            SearchError::from(e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "upstream response is not valid JSON");
            SearchError::DecodeError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = Config {
            upstream_url: "http://localhost:3000/api/".to_string(),
            ..Config::default()
        };
        let client = SearchClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_invalid_mode_fails_fast() {
        // nothing listens here; an attempted request would surface as RequestFailed
        let config = Config {
            upstream_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = SearchClient::from_config(&config).unwrap();
        let err = client.fetch_by_name("rust", "podcasts").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidMode(_)));
    }

    #[tokio::test]
    async fn test_empty_query_fails_fast() {
        let client = SearchClient::from_config(&Config::default()).unwrap();
        let err = client.fetch("   ", Mode::Web).await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }
}
