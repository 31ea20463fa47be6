//! Query submission.
//!
//! Each non-empty query term is typed into the input found by its field's
//! rule set. The form is then submitted by clicking the first submit control
//! found, or by pressing Enter in the first located input when there is none.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::page::Page;
use crate::selector::locate;
use crate::Options;

/// Named search terms, in the order they are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    terms: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term. Blank values are kept but never submitted.
    #[must_use]
    pub fn term(mut self, name: &str, value: &str) -> Self {
        self.terms.push((name.to_string(), value.to_string()));
        self
    }

    /// Shorthand for a `title` term.
    #[must_use]
    pub fn title(self, value: &str) -> Self {
        self.term("title", value)
    }

    /// Shorthand for an `authors` term.
    #[must_use]
    pub fn authors(self, value: &str) -> Self {
        self.term("authors", value)
    }

    /// Terms with a non-blank value, trimmed.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.terms
            .iter()
            .map(|(name, value)| (name.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Whether no term has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms().next().is_none()
    }
}

/// How a form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMethod {
    Click,
    EnterKey,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(SubmitMethod),
    /// Nothing to type into and nothing to click; no navigation attempted.
    NoInputFound,
}

/// Fill the query into the current page and submit it.
///
/// Errors are only returned when the last available way to submit fails in
/// the page itself; locator misses are reported through [`SubmitOutcome`].
pub fn submit<P: Page + ?Sized>(page: &mut P, query: &Query, options: &Options) -> Result<SubmitOutcome> {
    let mut first_input: Option<P::Element> = None;

    for (name, value) in query.terms() {
        let rules = options.rules_for_field(name);
        let Some(input) = locate(page, &rules, None) else {
            warn!(field = name, "no input found for query term");
            continue;
        };

        match page.clear_and_type(&input, value) {
            Ok(()) => debug!(field = name, "query term entered"),
            Err(err) => warn!(field = name, error = %err, "could not type query term"),
        }
        if first_input.is_none() {
            first_input = Some(input);
        }
    }

    let mut click_error = None;
    if let Some(control) = locate(page, &options.submit_rules, None) {
        match page.click(&control) {
            Ok(()) => {
                info!("search submitted by clicking");
                return Ok(SubmitOutcome::Submitted(SubmitMethod::Click));
            }
            Err(err) => {
                warn!(error = %err, "submit control click failed");
                click_error = Some(err);
            }
        }
    }

    match (first_input, click_error) {
        (Some(input), _) => {
            page.press_enter(&input)?;
            info!("search submitted with Enter");
            Ok(SubmitOutcome::Submitted(SubmitMethod::EnterKey))
        }
        (None, Some(err)) => Err(err),
        (None, None) => {
            warn!("no search input or submit control found");
            Ok(SubmitOutcome::NoInputFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_skips_blank_terms() {
        let query = Query::new().title(" Турбина ").authors("  ");
        let terms: Vec<_> = query.terms().collect();
        assert_eq!(terms, vec![("title", "Турбина")]);
        assert!(!query.is_empty());
        assert!(Query::new().authors("").is_empty());
    }

    #[test]
    fn test_enter_goes_to_located_input_even_if_typing_failed() {
        use crate::page::{Action, HtmlPage};
        use crate::{FieldRules, SelectorRule};

        let options = Options {
            field_rules: vec![FieldRules {
                name: "title".into(),
                rules: vec![SelectorRule::css("#query")],
            }],
            ..Options::default()
        };
        let mut page = HtmlPage::new(r#"<div id="query" contenteditable="true"></div>"#);

        let outcome = submit(&mut page, &Query::new().title("насос"), &options).unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted(SubmitMethod::EnterKey));
        assert_eq!(page.actions(), &[Action::PressedEnter("div#query".into())]);
    }
}
