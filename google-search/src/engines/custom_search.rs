//! Custom Search JSON API: keyed requests with a 1-based start index.

use url::Url;

use crate::config::SearchConfig;
use crate::query::SearchQuery;

/// Fields requested from the JSON API; everything the parser reads.
pub const FIELDS: &str = "queries(nextPage,previousPage),searchInformation,spelling(correctedQuery),items(title,link,htmlSnippet,htmlFormattedUrl)";

/// Build the Custom Search request URL for `query`.
pub fn request_url(endpoint: &Url, query: &SearchQuery, config: &SearchConfig) -> Url {
    let start = (query.start_offset() + 1).to_string();
    let num = query.page_size().to_string();

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("cx", &config.search_engine_id)
        .append_pair("key", config.api_key.as_deref().unwrap_or_default())
        .append_pair("q", query.query_terms())
        .append_pair("hq", query.query_within_results_terms().unwrap_or_default())
        .append_pair("start", &start)
        .append_pair("num", &num)
        .append_pair("fields", FIELDS)
        .append_pair("hl", &config.language);
    url
}
