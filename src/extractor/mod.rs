//! Record extraction from result pages.
//!
//! Three strategies turn whatever structure a result page has into raw
//! candidates. The [`chain`] runs them in fixed priority order and stops at the
//! first one that yields anything.
//!
//! # Module Structure
//!
//! - `table`: positional mapping of result table rows
//! - `links`: document hyperlinks with container-text enrichment
//! - `text`: indicator-driven scan of the page's visible text
//! - `chain`: strategy ordering, truncation and normalization
//!
//! # Usage
//!
//! ```rust
//! use fips_search::extractor::{run_chain, ExtractContext};
//! use fips_search::{dom, Options, StrategyKind};
//!
//! let doc = dom::parse("<table><tr><th>Title</th></tr><tr><td>Patent X</td></tr></table>");
//! let options = Options::default();
//! let report = run_chain(&doc, &ExtractContext::new(&options, None));
//! assert_eq!(report.result.strategy, Some(StrategyKind::Table));
//! assert_eq!(report.attempted, vec![StrategyKind::Table]);
//! ```

use crate::url_utils::LinkResolver;
use crate::Options;

pub mod chain;
pub mod links;
pub mod table;
pub mod text;

pub use chain::{run_chain, ChainReport, Strategy, STRATEGIES};

/// Per-snapshot inputs shared by the strategies.
#[derive(Debug, Clone)]
pub struct ExtractContext<'o> {
    pub options: &'o Options,
    pub resolver: LinkResolver,
    pub max_records: usize,
}

impl<'o> ExtractContext<'o> {
    /// Context for a page at `page_url` (used to resolve relative links).
    #[must_use]
    pub fn new(options: &'o Options, page_url: Option<&str>) -> Self {
        Self {
            options,
            resolver: LinkResolver::new(page_url, &options.repository_domain),
            max_records: options.max_records,
        }
    }

    /// Override the record cap for this snapshot.
    #[must_use]
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }
}
