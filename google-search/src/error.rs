//! Error types for the google-search crate.
//!
//! Each variant names the boundary that failed: caller input, the
//! provider's response document, the transport, configuration, or the
//! cache. No API keys appear in error messages.

/// Errors that can occur while building, issuing or parsing a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A required argument was missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The response payload is not well-formed for its dialect.
    #[error("parse error: {0}")]
    Parse(String),

    /// The HTTP request to the provider failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The HTTP request to the provider timed out.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A cache strategy failed to fetch or store a response.
    ///
    /// [`crate::service::SearchService`] swallows these; they only reach
    /// callers who use a [`crate::cache::CacheStrategy`] directly.
    #[error("cache error: {0}")]
    Cache(String),
}

/// Convenience type alias for google-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
