//! Configuration options for searching and extraction.
//!
//! The `Options` struct carries every tunable of the pipeline: where the
//! registry lives, how long to wait for pages, how many records to keep, and
//! the keyword and selector lists the heuristics run on. All lists are plain
//! data so a deployment can swap them (for another locale or a redesigned
//! site) without touching code.

use std::borrow::Cow;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::selector::{rules, SelectorRule};

/// Rule set for one named query field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    /// Semantic name of the query term, e.g. `title`.
    pub name: String,
    /// Rules tried in order to find the input for this term.
    pub rules: Vec<SelectorRule>,
}

/// Configuration options for the search pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the FIPS registry settings.
///
/// # Example
///
/// ```rust
/// use fips_search::Options;
///
/// let options = Options {
///     max_records: 25,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Address of the search form.
    ///
    /// Default: `https://www.fips.ru/iiss/search.xhtml`
    pub search_url: String,

    /// Domain every `DocumentLink` must belong to (subdomains included).
    ///
    /// Default: `fips.ru`
    pub repository_domain: String,

    /// Maximum number of records per search. Must be at least 1.
    ///
    /// Default: `10`
    pub max_records: usize,

    /// Maximum number of unique document links the link strategy considers
    /// before applying `max_records`.
    ///
    /// Default: `50`
    pub link_cap: usize,

    /// Upper bound on any single settle wait, in milliseconds.
    ///
    /// Default: `30000`
    pub settle_timeout_ms: u64,

    /// Interval between settle checks, in milliseconds.
    ///
    /// Default: `250`
    pub poll_interval_ms: u64,

    /// Fixed delay before the first settle check, in milliseconds.
    ///
    /// Default: `0`
    pub min_settle_delay_ms: u64,

    /// Element that only appears once the result page has rendered.
    ///
    /// When set, the post-submission wait also ends early on any negative
    /// phrase. When unset, document readiness alone is awaited.
    ///
    /// Default: `None`
    pub results_marker: Option<SelectorRule>,

    /// Phrases that mean "nothing found" (matched case-insensitively).
    pub negative_phrases: Vec<String>,

    /// Substrings that start a new record in the text strategy.
    pub document_indicators: Vec<String>,

    /// Keywords routing a text line into `Authors`.
    pub author_keywords: Vec<String>,

    /// Keywords routing a text line into `RegistrationNumber`.
    pub registration_keywords: Vec<String>,

    /// Rule sets for named query fields.
    pub field_rules: Vec<FieldRules>,

    /// Rules for the submission control.
    pub submit_rules: Vec<SelectorRule>,

    /// Rules for hyperlinks referencing registry documents.
    pub document_link_rules: Vec<SelectorRule>,

    /// Rules for hyperlinks that count as result evidence when classifying
    /// a page. Default: href patterns `document` and `id=`.
    pub result_link_rules: Vec<SelectorRule>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            search_url: "https://www.fips.ru/iiss/search.xhtml".to_string(),
            repository_domain: "fips.ru".to_string(),
            max_records: 10,
            link_cap: 50,
            settle_timeout_ms: 30_000,
            poll_interval_ms: 250,
            min_settle_delay_ms: 0,
            results_marker: None,
            negative_phrases: strings(&[
                "ничего не найдено",
                "не найдено",
                "нет результатов",
                "no results found",
                "не найдены",
            ]),
            document_indicators: strings(&["патент", "заявка", "свидетельство", "patent", "certificate"]),
            author_keywords: strings(&["автор", "изобретател", "author", "inventor"]),
            registration_keywords: strings(&["номер", "№", "рег.", "registration", "reg. no"]),
            field_rules: vec![
                FieldRules {
                    name: "title".to_string(),
                    rules: rules::title_field(),
                },
                FieldRules {
                    name: "authors".to_string(),
                    rules: rules::authors_field(),
                },
            ],
            submit_rules: rules::submit_control(),
            document_link_rules: rules::document_links(),
            result_link_rules: rules::result_links(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Options {
    /// Parse options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_records == 0 {
            return Err(Error::InvalidOptions("max_records must be at least 1".into()));
        }
        if self.repository_domain.trim().is_empty() {
            return Err(Error::InvalidOptions("repository_domain is empty".into()));
        }
        if self.settle_timeout_ms == 0 {
            return Err(Error::InvalidOptions("settle_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Rules for the query field called `name` (configured set, or generic
    /// name-based rules when none is configured).
    #[must_use]
    pub fn rules_for_field(&self, name: &str) -> Cow<'_, [SelectorRule]> {
        self.field_rules
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map_or_else(
                || Cow::Owned(rules::generic_field(name)),
                |f| Cow::Borrowed(f.rules.as_slice()),
            )
    }

    #[must_use]
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn min_settle_delay(&self) -> Duration {
        Duration::from_millis(self.min_settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_for_known_field_are_borrowed() {
        let options = Options::default();
        assert!(matches!(options.rules_for_field("Title"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rules_for_unknown_field_are_generic() {
        let options = Options::default();
        let rules = options.rules_for_field("applicant");
        assert_eq!(rules.len(), 3);
        assert_eq!(
            rules[0],
            SelectorRule::attribute("input", &["id", "name"], "applicant")
        );
    }

    #[test]
    fn test_validate_rejects_zero_records() {
        let options = Options {
            max_records: 0,
            ..Options::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }
}
