//! Legacy Site Search XML dialect.
//!
//! The document is rooted at `GSP`. The nodes read are:
//!
//! - `/GSP/RES/M`: estimated total result count
//! - `/GSP/PARAM[@name='start']/@value`: echoed 0-based start offset
//! - `/GSP/RES/R`: one per result, with `T` (title), `S` (excerpt), `U` (URL)
//! - `/GSP/Spelling/Suggestion/@q`: URL-encoded corrected query
//!
//! Title and excerpt hold HTML that the provider has escaped once into
//! XML, so they are taken as inner XML and HTML-entity-decoded once.

use std::num::IntErrorKind;

use roxmltree::{Document, Node};
use url::Url;

use super::{ResponseParser, Totals};
use crate::error::{Result, SearchError};
use crate::types::{Dialect, SearchResult};

/// The provider never returns results ranked beyond this depth.
pub const RESULTS_WINDOW: u64 = 1000;

/// A parsed XML dialect payload.
#[derive(Debug, Clone, Default)]
pub struct XmlResponse {
    counter: Option<String>,
    start: Option<String>,
    hits: Vec<XmlHit>,
    suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct XmlHit {
    title: Option<String>,
    excerpt: Option<String>,
    url: Option<Url>,
}

impl XmlResponse {
    /// Parse the document and extract the nodes this dialect reads.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the payload is not well-formed
    /// XML, the root element is not `GSP`, or a result URL is not absolute.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)
            .map_err(|e| SearchError::Parse(format!("invalid XML response: {e}")))?;
        let root = doc.root_element();
        if !root.has_tag_name("GSP") {
            return Err(SearchError::Parse(format!(
                "expected GSP root element, found {}",
                root.tag_name().name()
            )));
        }

        let start = root
            .children()
            .filter(|n| n.has_tag_name("PARAM"))
            .find(|n| n.attribute("name") == Some("start"))
            .and_then(|n| n.attribute("value"))
            .map(str::to_owned);

        let suggestions = child(root, "Spelling")
            .map(|spelling| {
                spelling
                    .children()
                    .filter(|n| n.has_tag_name("Suggestion"))
                    .map(|n| n.attribute("q").unwrap_or_default().to_owned())
                    .collect()
            })
            .unwrap_or_default();

        let (counter, hits) = match child(root, "RES") {
            Some(res) => {
                let counter = child(res, "M").map(text_content);
                let hits = res
                    .children()
                    .filter(|n| n.has_tag_name("R"))
                    .map(|r| parse_hit(r, xml))
                    .collect::<Result<Vec<_>>>()?;
                (counter, hits)
            }
            None => (None, Vec::new()),
        };

        Ok(Self {
            counter,
            start,
            hits,
            suggestions,
        })
    }

    /// `true` unless the echoed start offset reaches the results window.
    ///
    /// A start value that is not a number is treated as absent; one too
    /// large to represent is necessarily past the window.
    fn start_within_window(&self) -> bool {
        let Some(start) = self.start.as_deref() else {
            return true;
        };
        match start.trim().parse::<u64>() {
            Ok(offset) => offset < RESULTS_WINDOW,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => false,
            Err(_) => true,
        }
    }
}

impl ResponseParser for XmlResponse {
    fn dialect(&self) -> Dialect {
        Dialect::Xml
    }

    fn totals(&self) -> Totals {
        match self.counter.as_deref() {
            Some(counter) => Totals {
                total_results: parse_counter(counter),
                results_available: true,
            },
            // No counter means either no matches or a page past the window;
            // only the start offset tells them apart.
            None => Totals {
                total_results: 0,
                results_available: self.start_within_window(),
            },
        }
    }

    fn results(&self) -> Vec<SearchResult> {
        self.hits
            .iter()
            .map(|hit| SearchResult {
                title: hit.title.as_deref().map(decode_html).unwrap_or_default(),
                excerpt: hit.excerpt.as_deref().map(decode_html).unwrap_or_default(),
                url: hit.url.clone(),
            })
            .collect()
    }

    fn spelling_suggestions(&self) -> Vec<String> {
        self.suggestions.iter().map(|q| decode_query(q)).collect()
    }
}

fn parse_hit(result: Node<'_, '_>, source: &str) -> Result<XmlHit> {
    let url = child(result, "U")
        .map(|u| {
            let text = text_content(u);
            Url::parse(text.trim())
                .map_err(|e| SearchError::Parse(format!("invalid result URL {text:?}: {e}")))
        })
        .transpose()?;

    Ok(XmlHit {
        title: child(result, "T").map(|t| inner_xml(t, source).to_owned()),
        excerpt: child(result, "S").map(|s| inner_xml(s, source).to_owned()),
        url,
    })
}

fn parse_counter(counter: &str) -> u64 {
    match counter.trim().parse::<u64>() {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!(counter, error = %e, "unreadable result count, using 0");
            0
        }
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// The source text between an element's start and end tags.
fn inner_xml<'s>(node: Node<'_, '_>, source: &'s str) -> &'s str {
    let Some(outer) = source.get(node.range()) else {
        return "";
    };
    if !node.has_children() {
        return "";
    }
    let open_end = start_tag_end(outer);
    let close_start = outer.rfind("</").unwrap_or(outer.len());
    outer.get(open_end..close_start).unwrap_or_default()
}

/// Byte offset just past the `>` closing a start tag, skipping quoted attribute values.
fn start_tag_end(tag: &str) -> usize {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return i + 1,
            _ => {}
        }
    }
    tag.len()
}

fn decode_html(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Form-URL-decode a suggestion: `+` is a space, `%XX` a byte.
fn decode_query(q: &str) -> String {
    let spaced = q.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
