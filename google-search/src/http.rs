//! reqwest-backed [`Transport`] for talking to the provider.
//!
//! The client is built once from [`SearchConfig`] with its timeout,
//! User-Agent, optional proxy, and gzip/brotli decompression.

use std::time::Duration;

use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::transport::Transport;

/// User-Agent sent when the configuration does not set one.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for provider requests.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the proxy URL is invalid, or
/// [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .gzip(true)
        .brotli(true);

    if let Some(ref proxy) = config.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| SearchError::Config(format!("invalid proxy: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Production transport over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from search configuration.
    ///
    /// # Errors
    ///
    /// Same as [`build_client`].
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// Wrap an existing client, e.g. one shared with the rest of an application.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?
            .error_for_status()
            .map_err(map_reqwest_error)?;

        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::trace!(bytes = body.len(), "provider response received");
        Ok(body)
    }
}

// `without_url` keeps the API key out of error messages.
fn map_reqwest_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout(e.without_url().to_string())
    } else {
        SearchError::Http(e.without_url().to_string())
    }
}
