//! Search orchestrator: cache check, one transport call, parse, cache store.

use std::sync::Arc;

use crate::cache::CacheStrategy;
use crate::config::SearchConfig;
use crate::engines;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::query::SearchQuery;
use crate::response::SearchResponse;
use crate::transport::Transport;

/// Runs queries against one provider API.
///
/// # Pipeline
///
/// 1. Ask the [`CacheStrategy`] (if any) for a cached raw payload
/// 2. On a hit, parse it and return without touching the network
/// 3. On a miss, build the request URL and issue exactly one transport call
/// 4. Parse the body in the configured dialect
/// 5. Hand the response to the cache strategy, then return it
///
/// Cache failures, including cached payloads that no longer parse, are
/// logged and treated as a miss or a no-op. Transport and parse failures
/// are returned unchanged; nothing is retried.
pub struct SearchService<T = HttpTransport> {
    config: SearchConfig,
    transport: T,
    cache: Option<Arc<dyn CacheStrategy>>,
}

impl SearchService<HttpTransport> {
    /// Create a service that talks to the provider over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Config`] if `config` is invalid, or
    /// [`crate::SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> SearchService<T> {
    /// Create a service over a caller-supplied transport.
    pub fn with_transport(config: SearchConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            cache: None,
        }
    }

    /// Attach a cache strategy.
    pub fn with_cache_strategy(mut self, cache: Arc<dyn CacheStrategy>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run `query` and return the normalized response.
    ///
    /// # Errors
    ///
    /// - [`crate::SearchError::InvalidInput`] if `query` was built for another
    ///   dialect or the provider returned an empty body
    /// - [`crate::SearchError::Http`] / [`crate::SearchError::Timeout`] if the
    ///   transport fails
    /// - [`crate::SearchError::Parse`] if the body is malformed for the dialect
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = engines::request_url(query, &self.config)?;
        let dialect = self.config.dialect;

        if let Some(response) = self.fetch_cached(query) {
            tracing::trace!(terms = query.query_terms(), "cache hit");
            return Ok(response);
        }

        tracing::trace!(terms = query.query_terms(), "cache miss");
        tracing::debug!(%dialect, url = %engines::redacted(&url), "requesting results");

        let raw = self.transport.get(&url).await?;
        let response = SearchResponse::parse(dialect, raw)?;

        self.store_cached(query, &response);
        Ok(response)
    }

    /// A cached payload that no longer parses counts as a miss.
    fn fetch_cached(&self, query: &SearchQuery) -> Option<SearchResponse> {
        let cache = self.cache.as_ref()?;
        let raw = match cache.fetch_cached_response(query) {
            Ok(cached) => cached?,
            Err(err) => {
                tracing::warn!(error = %err, "cache lookup failed, querying provider");
                return None;
            }
        };
        match SearchResponse::parse(self.config.dialect, raw) {
            Ok(response) => Some(response),
            Err(err) => {
                tracing::warn!(error = %err, "cached response unreadable, querying provider");
                None
            }
        }
    }

    fn store_cached(&self, query: &SearchQuery, response: &SearchResponse) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(err) = cache.cache_response(query, response) {
            tracing::warn!(error = %err, "failed to cache response");
        }
    }
}

impl<T> std::fmt::Debug for SearchService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("config", &self.config)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
