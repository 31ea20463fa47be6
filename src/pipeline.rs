//! End-to-end search.
//!
//! [`search`] drives one query through the registry: open the search form,
//! wait for it, fill and submit the query, wait for the result page, then
//! classify and extract. Each call returns its own [`SearchOutcome`]; nothing
//! is kept between calls.

use tracing::{debug, info, info_span, warn};
use url::Url;

use crate::classify::{classify_document, Classification};
use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::{run_chain, ExtractContext};
use crate::page::Page;
use crate::result::ResultSet;
use crate::settle::{wait_for, SettleCondition, SettlePolicy};
use crate::submit::{submit, Query, SubmitOutcome};
use crate::url_utils::belongs_to_domain;
use crate::Options;

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The registry reported no matches. This is a successful outcome.
    NoResults,
    /// Records extracted from the result page. Never empty.
    Found(ResultSet),
}

impl SearchOutcome {
    /// Records found, if any.
    #[must_use]
    pub fn records(&self) -> Option<&ResultSet> {
        match self {
            Self::NoResults => None,
            Self::Found(set) => Some(set),
        }
    }
}

/// Run `query` against the registry through `page`.
///
/// # Errors
///
/// - [`Error::InvalidOptions`] before anything is touched
/// - [`Error::LoadTimeout`] when the form or the result page does not settle
/// - [`Error::UnexpectedLocation`] when the form is not on the repository domain
/// - [`Error::NoInputFound`] when the form has nothing to type into or click
/// - [`Error::NoRecords`] when the page looks like results but nothing extracts
/// - whatever the page itself fails with while navigating or submitting
pub fn search<P: Page + ?Sized>(
    page: &mut P,
    query: &Query,
    options: &Options,
) -> Result<SearchOutcome> {
    options.validate()?;
    let span = info_span!("search", url = %options.search_url);
    let _enter = span.enter();

    let policy = SettlePolicy::from_options(options);

    page.navigate(&options.search_url)?;
    wait_for(page, &SettleCondition::Ready, &policy)?;
    check_location(page, options)?;

    match submit(page, query, options)? {
        SubmitOutcome::Submitted(method) => debug!(?method, "query submitted"),
        SubmitOutcome::NoInputFound => return Err(Error::NoInputFound),
    }

    wait_for(page, &SettleCondition::after_submit(options), &policy)?;
    collect_results(page, options)
}

/// Classify the page currently loaded and extract its records.
///
/// Both steps read the same snapshot.
pub fn collect_results<P: Page + ?Sized>(page: &P, options: &Options) -> Result<SearchOutcome> {
    let html = page.html()?;
    let doc = dom::parse(&html);

    if classify_document(&doc, options) == Classification::NoResults {
        info!("registry reported no results");
        return Ok(SearchOutcome::NoResults);
    }

    let page_url = page.current_url();
    let report = run_chain(&doc, &ExtractContext::new(options, page_url.as_deref()));
    if report.result.is_empty() {
        warn!(attempted = ?report.attempted, "result page yielded no records");
        return Err(Error::NoRecords);
    }
    Ok(SearchOutcome::Found(report.result))
}

/// Extract records from the page currently loaded, skipping classification.
///
/// An empty result set is returned as is.
pub fn extract<P: Page + ?Sized>(page: &P, options: &Options) -> Result<ResultSet> {
    let html = page.html()?;
    let page_url = page.current_url();
    let ctx = ExtractContext::new(options, page_url.as_deref());
    Ok(run_chain(&dom::parse(&html), &ctx).result)
}

fn check_location<P: Page + ?Sized>(page: &P, options: &Options) -> Result<()> {
    let Some(current) = page.current_url() else {
        debug!("page does not report its location");
        return Ok(());
    };

    let on_domain = Url::parse(&current)
        .map(|url| belongs_to_domain(&url, &options.repository_domain))
        .unwrap_or(false);
    if on_domain {
        Ok(())
    } else {
        warn!(url = %current, "search form is outside the repository domain");
        Err(Error::UnexpectedLocation(current))
    }
}
