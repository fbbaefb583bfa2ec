//! Pluggable response caching.
//!
//! [`CacheStrategy`] is the check-before-call / store-after-call hook used by
//! [`crate::service::SearchService`]. Failures from either side are treated
//! as a miss or a no-op by the service. [`MemoryCache`] is an in-process
//! implementation on [`moka`] with bounded capacity and a TTL.

use std::time::Duration;

use moka::sync::Cache;

use crate::error::Result;
use crate::query::SearchQuery;
use crate::response::SearchResponse;
use crate::types::Dialect;

/// Default maximum number of cached responses.
pub const DEFAULT_MAX_ENTRIES: u64 = 100;

/// Stores raw provider payloads keyed by query.
pub trait CacheStrategy: Send + Sync {
    /// Look up a cached raw payload for `query`.
    ///
    /// Returns `Ok(None)` on a miss.
    fn fetch_cached_response(&self, query: &SearchQuery) -> Result<Option<String>>;

    /// Store `response` for later lookups of `query`.
    fn cache_response(&self, query: &SearchQuery, response: &SearchResponse) -> Result<()>;
}

/// Cache key: dialect, normalised terms, and paging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    dialect: Dialect,
    /// Lowercased, trimmed query terms.
    terms: String,
    /// Lowercased, trimmed within-results terms; empty when absent.
    within: String,
    page: u32,
    page_size: u32,
}

impl CacheKey {
    /// Build a deterministic cache key from a query.
    ///
    /// Terms are lowercased and trimmed so `" Bins "` and `"bins"` share
    /// an entry. A missing within-results filter and an empty one match.
    pub fn new(query: &SearchQuery) -> Self {
        Self {
            dialect: query.dialect(),
            terms: normalise(query.query_terms()),
            within: normalise(query.query_within_results_terms().unwrap_or_default()),
            page: query.page(),
            page_size: query.page_size(),
        }
    }
}

fn normalise(terms: &str) -> String {
    terms.trim().to_lowercase()
}

/// In-memory [`CacheStrategy`] that never fails.
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<CacheKey, String>,
}

impl MemoryCache {
    /// Create a cache holding up to `max_entries` responses for `ttl`.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Create a cache with [`DEFAULT_MAX_ENTRIES`] and a TTL in seconds.
    pub fn with_ttl_seconds(ttl_seconds: u64) -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, Duration::from_secs(ttl_seconds))
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl CacheStrategy for MemoryCache {
    fn fetch_cached_response(&self, query: &SearchQuery) -> Result<Option<String>> {
        Ok(self.cache.get(&CacheKey::new(query)))
    }

    fn cache_response(&self, query: &SearchQuery, response: &SearchResponse) -> Result<()> {
        self.cache
            .insert(CacheKey::new(query), response.raw_data().to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = include_str!("../tests/fixtures/site_search_results.xml");

    fn query(terms: &str) -> SearchQuery {
        SearchQuery::new(Dialect::Xml, terms)
    }

    #[test]
    fn cache_key_deterministic_for_same_inputs() {
        assert_eq!(CacheKey::new(&query("term dates")), CacheKey::new(&query("term dates")));
    }

    #[test]
    fn cache_key_normalises_case_and_whitespace() {
        assert_eq!(
            CacheKey::new(&query("  Term Dates ")),
            CacheKey::new(&query("term dates"))
        );
    }

    #[test]
    fn cache_key_differs_when_terms_differ() {
        assert_ne!(CacheKey::new(&query("parking")), CacheKey::new(&query("libraries")));
    }

    #[test]
    fn cache_key_differs_by_page_and_size() {
        let base = query("parking");
        assert_ne!(
            CacheKey::new(&base),
            CacheKey::new(&base.clone().with_page(2))
        );
        assert_ne!(
            CacheKey::new(&base),
            CacheKey::new(&base.clone().with_page_size(5))
        );
    }

    #[test]
    fn cache_key_differs_by_dialect() {
        assert_ne!(
            CacheKey::new(&SearchQuery::new(Dialect::Xml, "parking")),
            CacheKey::new(&SearchQuery::new(Dialect::Json, "parking"))
        );
    }

    #[test]
    fn empty_within_terms_match_absent() {
        assert_eq!(
            CacheKey::new(&query("parking").with_query_within_results_terms(" ")),
            CacheKey::new(&query("parking"))
        );
    }

    #[test]
    fn miss_returns_none() {
        let cache = MemoryCache::with_ttl_seconds(600);
        let cached = cache.fetch_cached_response(&query("nothing cached")).expect("fetch");
        assert!(cached.is_none());
    }

    #[test]
    fn store_then_fetch_returns_raw_payload() {
        let cache = MemoryCache::with_ttl_seconds(600);
        let response = SearchResponse::from_xml(XML).expect("parse");
        cache
            .cache_response(&query("school term dates"), &response)
            .expect("store");

        let cached = cache
            .fetch_cached_response(&query("School Term Dates"))
            .expect("fetch")
            .expect("should be cached");
        assert_eq!(cached, XML);
    }

    #[test]
    fn overwrite_same_key_updates_value() {
        let cache = MemoryCache::with_ttl_seconds(600);
        let old = SearchResponse::from_json(r#"{"searchInformation":{"totalResults":"1"}}"#)
            .expect("parse");
        let new = SearchResponse::from_json(r#"{"searchInformation":{"totalResults":"2"}}"#)
            .expect("parse");
        let q = SearchQuery::new(Dialect::Json, "bins");

        cache.cache_response(&q, &old).expect("store");
        cache.cache_response(&q, &new).expect("store");

        let cached = cache.fetch_cached_response(&q).expect("fetch");
        assert_eq!(cached.as_deref(), Some(new.raw_data()));
    }

    #[test]
    fn memory_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryCache>();
    }
}
