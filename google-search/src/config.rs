//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the opaque provider credentials, the dialect
//! to speak, and HTTP client behaviour. Provider endpoints are
//! configurable so tests can point the client at a local server.

use crate::error::SearchError;
use crate::types::Dialect;
use url::Url;

/// Default endpoint for the Custom Search JSON API.
pub const DEFAULT_JSON_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Default endpoint for the legacy Site Search XML API.
pub const DEFAULT_XML_ENDPOINT: &str = "http://www.google.com/search";

/// Configuration for a search service.
///
/// Use [`Default::default()`] with field overrides; at minimum
/// `search_engine_id` (and `api_key` for the JSON dialect) must be set.
#[derive(Clone)]
pub struct SearchConfig {
    /// Which wire dialect to request and parse.
    pub dialect: Dialect,
    /// The provider's search engine identifier (`cx`).
    pub search_engine_id: String,
    /// API key for the JSON dialect. Ignored by the XML dialect.
    pub api_key: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are sent.
    pub user_agent: Option<String>,
    /// Proxy URL for all provider requests.
    pub proxy: Option<String>,
    /// Interface language requested from the provider (`hl`).
    pub language: String,
    /// Base URL for JSON dialect requests.
    pub json_endpoint: String,
    /// Base URL for XML dialect requests.
    pub xml_endpoint: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Json,
            search_engine_id: String::new(),
            api_key: None,
            timeout_seconds: 8,
            user_agent: None,
            proxy: None,
            language: "en".into(),
            json_endpoint: DEFAULT_JSON_ENDPOINT.into(),
            xml_endpoint: DEFAULT_XML_ENDPOINT.into(),
        }
    }
}

// Hand-written so the API key never reaches logs through `{:?}`.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("dialect", &self.dialect)
            .field("search_engine_id", &self.search_engine_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .field("language", &self.language)
            .field("json_endpoint", &self.json_endpoint)
            .field("xml_endpoint", &self.xml_endpoint)
            .finish()
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `search_engine_id` must not be empty
    /// - `timeout_seconds` must be greater than 0
    /// - `api_key` must be present and non-empty for [`Dialect::Json`]
    /// - the endpoint for the configured dialect must be an absolute URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.search_engine_id.trim().is_empty() {
            return Err(SearchError::Config(
                "search_engine_id must not be empty".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.dialect == Dialect::Json
            && self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(SearchError::Config(
                "api_key is required for the JSON dialect".into(),
            ));
        }
        self.endpoint()?;
        Ok(())
    }

    /// The parsed base URL for the configured dialect.
    pub fn endpoint(&self) -> Result<Url, SearchError> {
        let raw = match self.dialect {
            Dialect::Xml => &self.xml_endpoint,
            Dialect::Json => &self.json_endpoint,
        };
        Url::parse(raw)
            .map_err(|e| SearchError::Config(format!("invalid {} endpoint: {e}", self.dialect)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_config() -> SearchConfig {
        SearchConfig {
            search_engine_id: "012345:abcdef".into(),
            api_key: Some("test-key".into()),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.dialect, Dialect::Json);
        assert_eq!(config.timeout_seconds, 8);
        assert_eq!(config.language, "en");
        assert_eq!(config.json_endpoint, DEFAULT_JSON_ENDPOINT);
        assert_eq!(config.xml_endpoint, DEFAULT_XML_ENDPOINT);
        assert!(config.user_agent.is_none());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(json_config().validate().is_ok());
    }

    #[test]
    fn default_config_needs_engine_id() {
        let err = SearchConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("search_engine_id"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..json_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn json_dialect_requires_api_key() {
        let config = SearchConfig {
            api_key: None,
            ..json_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));

        let config = SearchConfig {
            api_key: Some("  ".into()),
            ..json_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn xml_dialect_does_not_need_api_key() {
        let config = SearchConfig {
            dialect: Dialect::Xml,
            api_key: None,
            ..json_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relative_endpoint_rejected() {
        let config = SearchConfig {
            json_endpoint: "/customsearch/v1".into(),
            ..json_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", json_config());
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
