//! # google-search
//!
//! A client for the provider's hosted site search, speaking both wire
//! dialects it has issued over time: the legacy Site Search XML output and
//! the Custom Search JSON API.
//!
//! ## Design
//!
//! - [`SearchQuery`] carries terms and paging; page size is clamped per dialect
//! - [`SearchService`] checks an optional [`CacheStrategy`], makes at most one
//!   request through a [`Transport`], and parses the body
//! - [`SearchResponse`] parses once and exposes memoized totals, results and
//!   spelling suggestions identically for both dialects
//! - [`SearchResponse::raw_data`] keeps the payload verbatim for caching
//!
//! ## Security
//!
//! - The API key is never logged and is redacted from `Debug` output
//! - Search queries are logged only at trace level
//! - Transport errors are stripped of the request URL

pub mod cache;
pub mod config;
pub mod engines;
pub mod error;
pub mod http;
pub mod query;
pub mod response;
pub mod service;
pub mod transport;
pub mod types;

pub use cache::{CacheStrategy, MemoryCache};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use http::HttpTransport;
pub use query::SearchQuery;
pub use response::SearchResponse;
pub use service::SearchService;
pub use transport::Transport;
pub use types::{Dialect, SearchResult};

/// Run a single query over HTTPS without caching.
///
/// Convenience wrapper around [`SearchService::new`] and
/// [`SearchService::search`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, otherwise the
/// same errors as [`SearchService::search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> google_search::Result<()> {
/// use google_search::{Dialect, SearchConfig, SearchQuery};
///
/// let config = SearchConfig {
///     search_engine_id: "008000000000000000000:abcdefghijk".into(),
///     api_key: Some("my-api-key".into()),
///     ..Default::default()
/// };
/// let query = SearchQuery::new(Dialect::Json, "council tax");
/// let response = google_search::search(&query, &config).await?;
/// println!("{} results", response.total_results());
/// for result in response.results() {
///     println!("{}: {:?}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &SearchQuery, config: &SearchConfig) -> Result<SearchResponse> {
    SearchService::new(config.clone())?.search(query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_empty_engine_id() {
        let query = SearchQuery::new(Dialect::Json, "bins");
        let err = search(&query, &SearchConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("search_engine_id"));
    }

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            search_engine_id: "008:abc".into(),
            api_key: Some("key".into()),
            timeout_seconds: 0,
            ..Default::default()
        };
        let query = SearchQuery::new(Dialect::Json, "bins");
        let err = search(&query, &config).await.unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_validates_config_missing_api_key() {
        let config = SearchConfig {
            search_engine_id: "008:abc".into(),
            ..Default::default()
        };
        let query = SearchQuery::new(Dialect::Json, "bins");
        let err = search(&query, &config).await.unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }
}
