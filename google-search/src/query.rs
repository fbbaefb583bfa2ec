//! Search query parameters.

use crate::types::Dialect;

/// The parameters of one search request.
///
/// Built with [`SearchQuery::new`] and refined with the `with_*` methods,
/// which consume and return the query. Once handed to a
/// [`crate::service::SearchService`] it is only read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    dialect: Dialect,
    query_terms: String,
    query_within_results_terms: Option<String>,
    page: u32,
    page_size: u32,
}

impl SearchQuery {
    /// Create a query for the first page with the dialect's default page size.
    ///
    /// Empty query text is accepted and sent as-is.
    pub fn new(dialect: Dialect, query_terms: impl Into<String>) -> Self {
        Self {
            dialect,
            query_terms: query_terms.into(),
            query_within_results_terms: None,
            page: 1,
            page_size: dialect.default_page_size(),
        }
    }

    /// Restrict results to those also matching `terms`.
    pub fn with_query_within_results_terms(mut self, terms: impl Into<String>) -> Self {
        self.query_within_results_terms = Some(terms.into());
        self
    }

    /// Select the 1-based page of results. Zero is treated as page 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set how many results are on each page.
    ///
    /// Values above the dialect maximum are silently clamped to it, and
    /// zero is raised to one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, self.dialect.max_page_size());
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn query_terms(&self) -> &str {
        &self.query_terms
    }

    pub fn query_within_results_terms(&self) -> Option<&str> {
        self.query_within_results_terms.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 0-based offset of the first requested result.
    pub fn start_offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}
