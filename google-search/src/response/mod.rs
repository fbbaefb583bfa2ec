//! Normalized search responses.
//!
//! A [`SearchResponse`] wraps exactly one raw provider payload. The payload
//! is parsed once at construction by the dialect's [`ResponseParser`];
//! the derived views (totals, results, spelling suggestions) are computed
//! on first read and cached for the lifetime of the response.

pub mod json;
pub mod xml;

use std::fmt;
use std::sync::OnceLock;

use crate::error::{Result, SearchError};
use crate::types::{Dialect, SearchResult};

pub use json::{ApiResponse, JsonResponse};
pub use xml::XmlResponse;

/// Result count and availability, derived together because the XML
/// dialect decides both from the same nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Total number of matches reported by the provider.
    pub total_results: u64,
    /// `false` when the requested page lies beyond the provider's results window.
    pub results_available: bool,
}

/// A parsed payload in one wire dialect.
///
/// Implementations hold the structure produced by their one-time parse and
/// derive the normalized views from it. They do not cache;
/// [`SearchResponse`] does.
pub trait ResponseParser: fmt::Debug + Send + Sync {
    /// Which dialect this parser reads.
    fn dialect(&self) -> Dialect;

    /// Derive the total result count and availability flag.
    fn totals(&self) -> Totals;

    /// Derive the normalized results in provider ranking order.
    fn results(&self) -> Vec<SearchResult>;

    /// Derive spelling suggestions in document order.
    fn spelling_suggestions(&self) -> Vec<String>;
}

/// A provider response with memoized, dialect-independent views.
#[derive(Debug)]
pub struct SearchResponse {
    raw: String,
    parser: Box<dyn ResponseParser>,
    totals: OnceLock<Totals>,
    results: OnceLock<Vec<SearchResult>>,
    spelling_suggestions: OnceLock<Vec<String>>,
}

impl SearchResponse {
    /// Parse a raw payload in the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] for an empty payload and
    /// [`SearchError::Parse`] when the payload is not well-formed for
    /// `dialect`.
    pub fn parse(dialect: Dialect, raw: impl Into<String>) -> Result<Self> {
        match dialect {
            Dialect::Xml => Self::from_xml(raw),
            Dialect::Json => Self::from_json(raw),
        }
    }

    /// Parse a legacy Site Search XML payload.
    ///
    /// # Errors
    ///
    /// Same as [`SearchResponse::parse`].
    pub fn from_xml(raw: impl Into<String>) -> Result<Self> {
        let raw = non_empty(raw.into())?;
        let parser = XmlResponse::parse(&raw)?;
        Ok(Self::with_parser(raw, Box::new(parser)))
    }

    /// Parse a Custom Search JSON payload.
    ///
    /// # Errors
    ///
    /// Same as [`SearchResponse::parse`].
    pub fn from_json(raw: impl Into<String>) -> Result<Self> {
        let raw = non_empty(raw.into())?;
        let parser = JsonResponse::parse(&raw)?;
        Ok(Self::with_parser(raw, Box::new(parser)))
    }

    /// Wrap an already-deserialized JSON payload.
    ///
    /// [`SearchResponse::raw_data`] then returns the payload re-serialized
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if any item has a missing or
    /// non-absolute link.
    pub fn from_api_response(api_response: ApiResponse) -> Result<Self> {
        let raw = serde_json::to_string(&api_response)
            .map_err(|e| SearchError::Parse(format!("failed to serialize JSON response: {e}")))?;
        let parser = JsonResponse::new(api_response)?;
        Ok(Self::with_parser(raw, Box::new(parser)))
    }

    fn with_parser(raw: String, parser: Box<dyn ResponseParser>) -> Self {
        tracing::trace!(dialect = %parser.dialect(), bytes = raw.len(), "response parsed");
        Self {
            raw,
            parser,
            totals: OnceLock::new(),
            results: OnceLock::new(),
            spelling_suggestions: OnceLock::new(),
        }
    }

    /// The payload exactly as received, for logging and re-caching.
    pub fn raw_data(&self) -> &str {
        &self.raw
    }

    /// Which wire dialect this response was parsed from.
    pub fn dialect(&self) -> Dialect {
        self.parser.dialect()
    }

    /// Total number of matches reported by the provider.
    pub fn total_results(&self) -> u64 {
        self.totals().total_results
    }

    /// Whether the requested page lies inside the provider's results window.
    pub fn results_available(&self) -> bool {
        self.totals().results_available
    }

    /// The normalized results in provider ranking order.
    pub fn results(&self) -> &[SearchResult] {
        self.results.get_or_init(|| {
            let results = self.parser.results();
            tracing::debug!(count = results.len(), dialect = %self.dialect(), "results normalized");
            results
        })
    }

    /// Provider-proposed corrections to the query, possibly empty.
    pub fn spelling_suggestions(&self) -> &[String] {
        self.spelling_suggestions
            .get_or_init(|| self.parser.spelling_suggestions())
    }

    fn totals(&self) -> Totals {
        *self.totals.get_or_init(|| self.parser.totals())
    }
}

fn non_empty(raw: String) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(SearchError::InvalidInput(
            "response payload must not be empty".into(),
        ));
    }
    Ok(raw)
}
