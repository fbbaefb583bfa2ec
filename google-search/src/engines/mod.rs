//! Request construction for each provider API.
//!
//! Each module builds the GET URL for one dialect; [`request_url`]
//! dispatches on the configured dialect.

pub mod custom_search;
pub mod site_search;

use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::types::Dialect;

/// Build the request URL for `query` against the configured provider API.
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] if the query was built for a
/// different dialect than the configuration speaks, or
/// [`SearchError::Config`] if the endpoint is not a valid URL.
pub fn request_url(query: &SearchQuery, config: &SearchConfig) -> Result<Url, SearchError> {
    if query.dialect() != config.dialect {
        return Err(SearchError::InvalidInput(format!(
            "query built for the {} dialect but the service speaks {}",
            query.dialect(),
            config.dialect
        )));
    }
    let endpoint = config.endpoint()?;
    Ok(match config.dialect {
        Dialect::Xml => site_search::request_url(&endpoint, query, config),
        Dialect::Json => custom_search::request_url(&endpoint, query, config),
    })
}

/// `url` with the API key replaced, for logging.
pub fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_config() -> SearchConfig {
        SearchConfig {
            search_engine_id: "008:abc".into(),
            api_key: Some("secret-key".into()),
            ..Default::default()
        }
    }

    #[test]
    fn dispatches_on_config_dialect() {
        let url = request_url(&SearchQuery::new(Dialect::Json, "bins"), &json_config())
            .expect("url");
        assert!(url.as_str().starts_with(crate::config::DEFAULT_JSON_ENDPOINT));

        let config = SearchConfig {
            dialect: Dialect::Xml,
            ..json_config()
        };
        let url = request_url(&SearchQuery::new(Dialect::Xml, "bins"), &config).expect("url");
        assert!(url.as_str().starts_with(crate::config::DEFAULT_XML_ENDPOINT));
    }

    #[test]
    fn dialect_mismatch_is_invalid_input() {
        let err = request_url(&SearchQuery::new(Dialect::Xml, "bins"), &json_config())
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[test]
    fn redacted_hides_api_key_only() {
        let url = request_url(&SearchQuery::new(Dialect::Json, "bins"), &json_config())
            .expect("url");
        let redacted = redacted(&url);
        assert!(!redacted.as_str().contains("secret-key"));
        assert!(redacted.as_str().contains("key=REDACTED"));
        assert!(redacted.as_str().contains("q=bins"));
    }
}
