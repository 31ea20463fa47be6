//! # fips-search
//!
//! Search a document registry through its web interface and extract a
//! structured record set from whatever result page comes back.
//!
//! Registry result pages are not stable: the same search may come back as a
//! table, a list of document links, or loosely formatted text. This crate
//! tries table, link and text extraction in that order and normalizes the
//! first non-empty result into a fixed [`Record`] schema.
//!
//! ## Quick Start
//!
//! ```rust
//! use fips_search::{extract_records, StrategyKind};
//!
//! let html = r#"<table>
//!   <tr><th>Title</th><th>Authors</th></tr>
//!   <tr><td>Method of welding</td><td>Ivanov I.I.</td></tr>
//! </table>"#;
//!
//! let records = extract_records(html);
//! assert_eq!(records.strategy, Some(StrategyKind::Table));
//! assert_eq!(records.records[0].title.as_deref(), Some("Method of welding"));
//! ```
//!
//! Driving a live search goes through [`search`] and a [`Page`]
//! implementation. [`HtmlPage`] is an in-memory page for saved snapshots.
//!
//! ```rust
//! use fips_search::{search, HtmlPage, Options, Query, SearchOutcome};
//!
//! let options = Options { settle_timeout_ms: 100, ..Options::default() };
//! let mut page = HtmlPage::blank()
//!     .with_route(&options.search_url, r#"<input name="docname"><button>Найти</button>"#)
//!     .with_submit_response("<p>Ничего не найдено</p>");
//!
//! let outcome = search(&mut page, &Query::new().title("турбина"), &options)?;
//! assert_eq!(outcome, SearchOutcome::NoResults);
//! # Ok::<(), fips_search::Error>(())
//! ```

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// URL resolution and repository domain checks.
pub mod url_utils;

/// Selector rules and the element locator.
pub mod selector;

/// Page collaborator trait and the in-memory page.
pub mod page;

/// Bounded settle waits.
pub mod settle;

/// Query filling and form submission.
pub mod submit;

/// Result page classification.
pub mod classify;

/// Table, link and text extraction strategies and their chain.
pub mod extractor;

/// Record normalization and deduplication.
pub mod normalize;

/// End-to-end search.
pub mod pipeline;

/// `==Name==` sectioned text reports.
pub mod sections;

// Public API - re-exports
pub use classify::Classification;
pub use error::{Error, ItemError, Result};
pub use options::{FieldRules, Options};
pub use page::{HtmlPage, Page};
pub use pipeline::{search, SearchOutcome};
pub use result::{Field, RawCandidate, Record, ResultSet, StrategyKind, NOT_SPECIFIED};
pub use selector::SelectorRule;
pub use submit::{Query, SubmitMethod, SubmitOutcome};

use extractor::{run_chain, ExtractContext};

/// Extract records from a saved result page using default options.
///
/// Relative links cannot be resolved without a page URL, so only absolute
/// document links are kept.
#[must_use]
pub fn extract_records(html: &str) -> ResultSet {
    extract_records_with_options(html, None, &Options::default())
}

/// Extract records from a saved result page.
///
/// `page_url` is the address the page was loaded from; relative links are
/// resolved against it.
#[must_use]
pub fn extract_records_with_options(html: &str, page_url: Option<&str>, options: &Options) -> ResultSet {
    let doc = dom::parse(html);
    run_chain(&doc, &ExtractContext::new(options, page_url)).result
}

/// Classify a saved result page using default options.
#[must_use]
pub fn classify_html(html: &str) -> Classification {
    classify::classify_document(&dom::parse(html), &Options::default())
}
