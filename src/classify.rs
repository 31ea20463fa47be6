//! Result classification.
//!
//! A negative phrase anywhere in the visible page text means "no results",
//! whatever else the page contains. Only when no such phrase is present does
//! structure count: a multi-row table or a link to a registry document means
//! "has results". Links are judged by their target only.
//! Absent any evidence the answer is "no results".

use dom_query::Document;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dom;
use crate::extractor::table::own_row_count;
use crate::page::Page;
use crate::selector::select_any;
use crate::Options;

/// Whether a search produced results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    HasResults,
    NoResults,
}

/// Classify the page currently loaded in `page`.
///
/// The snapshot is re-read on every call. A page that cannot be read
/// classifies as `NoResults`.
pub fn classify<P: Page + ?Sized>(page: &P, options: &Options) -> Classification {
    match page.html() {
        Ok(html) => classify_document(&dom::parse(&html), options),
        Err(err) => {
            warn!(error = %err, "page unreadable; treating as no results");
            Classification::NoResults
        }
    }
}

/// Classify a parsed snapshot.
#[must_use]
pub fn classify_document(doc: &Document, options: &Options) -> Classification {
    if let Some(phrase) = negative_phrase(doc, options) {
        debug!(phrase, "negative phrase found");
        return Classification::NoResults;
    }

    let has_table = doc
        .select("table")
        .nodes()
        .iter()
        .any(|table| own_row_count(table) > 1);
    if has_table {
        debug!("multi-row table found");
        return Classification::HasResults;
    }

    let links = select_any(&doc.select("html"), &options.result_link_rules).len();
    if links > 0 {
        debug!(links, "document links found");
        return Classification::HasResults;
    }

    debug!("no result evidence");
    Classification::NoResults
}

/// First configured negative phrase present in the page text.
fn negative_phrase<'o>(doc: &Document, options: &'o Options) -> Option<&'o str> {
    let text = dom::page_lines(doc).join("\n").to_lowercase();
    options
        .negative_phrases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .find(|p| text.contains(&p.to_lowercase()))
}
