//! Legacy Site Search: XML output with a 0-based start offset.

use url::Url;

use crate::config::SearchConfig;
use crate::query::SearchQuery;

/// Build the Site Search request URL for `query`.
///
/// `gl` is deliberately not sent: it reorders results towards one country,
/// and spelling suggestions are returned without it.
pub fn request_url(endpoint: &Url, query: &SearchQuery, config: &SearchConfig) -> Url {
    let start = query.start_offset().to_string();
    let num = query.page_size().to_string();

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("cx", &config.search_engine_id)
        .append_pair("q", query.query_terms())
        .append_pair("as_q", query.query_within_results_terms().unwrap_or_default())
        .append_pair("start", &start)
        .append_pair("num", &num)
        .append_pair("client", "google-csbe")
        .append_pair("output", "xml_no_dtd")
        .append_pair("ie", "utf8")
        .append_pair("oe", "utf8")
        .append_pair("hl", &config.language);
    url
}
