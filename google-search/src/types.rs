//! Core types for normalized search results and wire dialect identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A single normalized search hit.
///
/// Title and excerpt may contain inline markup from the provider (for
/// example `<b>` around matched terms); it is passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// A snippet summarising the page content.
    pub excerpt: String,
    /// The absolute URL of the result, if the provider supplied one.
    pub url: Option<Url>,
}

/// The two wire formats the provider has issued over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// Legacy Site Search XML (`/GSP/RES/R`).
    Xml,
    /// Custom Search JSON API (`searchInformation`, `items[]`).
    Json,
}

impl Dialect {
    /// Returns the human-readable name of this dialect.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Xml => "XML",
            Self::Json => "JSON",
        }
    }

    /// Page size used when a query does not ask for one.
    pub fn default_page_size(&self) -> u32 {
        match self {
            Self::Xml => 20,
            Self::Json => 10,
        }
    }

    /// Largest page size the provider accepts in one request.
    pub fn max_page_size(&self) -> u32 {
        match self {
            Self::Xml => 20,
            Self::Json => 10,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
