//! Error types for fips-search.
//!
//! Step-level failures of the search pipeline are reported through [`Error`].
//! Locator misses are plain `None` values and per-item extraction failures are
//! absorbed by the strategies (see [`ItemError`]), so neither appears here.

use std::time::Duration;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No query input and no submit control could be located on the page.
    #[error("No search input or submit control found")]
    NoInputFound,

    /// The page did not reach a settled state within the bound.
    #[error("Page did not settle within {0:?}")]
    LoadTimeout(Duration),

    /// All extraction strategies returned nothing.
    #[error("No records could be extracted from the result page")]
    NoRecords,

    /// Navigation ended on a page outside the repository domain.
    #[error("Unexpected page location: {0}")]
    UnexpectedLocation(String),

    /// An element handle refers to a document that has since been replaced.
    #[error("Stale element reference")]
    StaleElement,

    /// The page collaborator failed.
    #[error("Page operation failed: {0}")]
    Page(String),

    /// Options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Options could not be deserialized.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration or report file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter list has an odd number of entries and padding was refused.
    #[error("Odd number of parameter items: {0}")]
    OddCount(usize),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single row, link or line that could not be turned into a raw candidate.
///
/// Strategies log these and move on; they never escape the extraction chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// The href could not be resolved to an absolute http(s) URL.
    #[error("unresolvable link {0:?}")]
    UnresolvableLink(String),

    /// The link points outside the repository domain.
    #[error("link {0:?} is outside the repository domain")]
    ForeignLink(String),

    /// The element carried no usable href.
    #[error("link without href")]
    MissingHref,
}
