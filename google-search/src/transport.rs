//! Trait definition for the transport that fetches raw provider payloads.
//!
//! [`crate::http::HttpTransport`] is the production implementation; tests
//! supply in-memory transports so no network is needed.

use std::sync::Arc;

use url::Url;

use crate::error::SearchError;

/// Issues one GET request and returns the response body verbatim.
///
/// Implementations must not retry. A cancelled or timed-out request is an
/// error, never a partial body.
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] or [`SearchError::Timeout`] when the
    /// request fails or the provider answers with a non-success status.
    fn get(&self, url: &Url)
        -> impl std::future::Future<Output = Result<String, SearchError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<String, SearchError> {
        (**self).get(url).await
    }
}
