//! Custom Search JSON dialect.
//!
//! Field names follow the provider's JSON API verbatim. Requests restrict
//! the payload with `fields=`, so everything except `searchInformation`
//! may be absent.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ResponseParser, Totals};
use crate::error::{Result, SearchError};
use crate::types::{Dialect, SearchResult};

/// Top-level Custom Search API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Queries>,
    pub search_information: SearchInformation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling: Option<Spelling>,
}

/// Links to the neighbouring pages of results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queries {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_page: Vec<PageQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_page: Vec<PageQuery>,
}

/// The request that would fetch a neighbouring page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub start_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cx: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    #[serde(default)]
    pub search_time: f64,
    #[serde(default)]
    pub formatted_search_time: String,
    /// Total match count, sent by the provider as a string.
    #[serde(default)]
    pub total_results: String,
    #[serde(default)]
    pub formatted_total_results: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spelling {
    #[serde(default)]
    pub corrected_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_corrected_query: Option<String>,
}

/// One search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_formatted_url: Option<String>,
}

/// A parsed JSON dialect payload.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    api: ApiResponse,
    links: Vec<Url>,
}

impl JsonResponse {
    /// Deserialize a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the payload is not valid JSON,
    /// lacks `searchInformation`, or an item link is missing or not absolute.
    pub fn parse(json: &str) -> Result<Self> {
        let api: ApiResponse = serde_json::from_str(json)
            .map_err(|e| SearchError::Parse(format!("invalid JSON response: {e}")))?;
        Self::new(api)
    }

    /// Wrap an already-deserialized payload, validating every item link.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if an item link is missing or not absolute.
    pub fn new(api: ApiResponse) -> Result<Self> {
        let links = api
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let link = item
                    .link
                    .as_deref()
                    .ok_or_else(|| SearchError::Parse(format!("item {i} has no link")))?;
                Url::parse(link)
                    .map_err(|e| SearchError::Parse(format!("invalid item link {link:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { api, links })
    }

    /// The deserialized payload.
    pub fn api_response(&self) -> &ApiResponse {
        &self.api
    }
}

impl ResponseParser for JsonResponse {
    fn dialect(&self) -> Dialect {
        Dialect::Json
    }

    fn totals(&self) -> Totals {
        let count = &self.api.search_information.total_results;
        let total_results = count.trim().parse::<u64>().unwrap_or_else(|e| {
            tracing::warn!(count = %count, error = %e, "unreadable result count, using 0");
            0
        });
        Totals {
            total_results,
            results_available: true,
        }
    }

    fn results(&self) -> Vec<SearchResult> {
        self.api
            .items
            .iter()
            .zip(&self.links)
            .map(|(item, link)| SearchResult {
                title: item.title.clone(),
                excerpt: item
                    .html_snippet
                    .as_deref()
                    .map(clean_snippet)
                    .unwrap_or_default(),
                url: Some(link.clone()),
            })
            .collect()
    }

    fn spelling_suggestions(&self) -> Vec<String> {
        self.api
            .spelling
            .as_ref()
            .map(|s| s.corrected_query.as_str())
            .filter(|q| !q.is_empty())
            .map(|q| vec![q.to_owned()])
            .unwrap_or_default()
    }
}

/// Strip the line breaks the provider inserts into snippets; other markup is kept.
fn clean_snippet(snippet: &str) -> String {
    snippet.replace('\n', "").replace("<br>", "")
}
