//! Selector Infrastructure
//!
//! A [`SelectorRule`] describes one way of finding an element on an
//! unpredictable page. Rules are tried strictly in order by [`locate`]; the
//! first rule that yields a match wins and its first element is returned.
//! A rule that cannot be evaluated (invalid selector, stale scope handle,
//! collaborator failure) simply counts as "no match".

use std::fmt;

use dom_query::Selection;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dom;
use crate::page::Page;

pub mod rules;

/// A prioritized description of how to find a page element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum SelectorRule {
    /// Any CSS selector, typically an attribute pattern such as
    /// `input[id*="docName"]`.
    Css { selector: String },

    /// Elements of `tag` where any of `attributes` contains `contains`
    /// (case-insensitive). `tag` may be `*`.
    Attribute {
        tag: String,
        attributes: Vec<String>,
        contains: String,
    },

    /// Elements of `tag` whose visible text (or `value` attribute, for inputs)
    /// contains `contains` (case-insensitive).
    Text { tag: String, contains: String },

    /// Generic element kind: every `tag`, optionally restricted to an input
    /// `type`. Inputs without a `type` attribute count as `text`.
    Kind {
        tag: String,
        input_type: Option<String>,
    },
}

impl SelectorRule {
    #[must_use]
    pub fn css(selector: &str) -> Self {
        Self::Css {
            selector: selector.to_string(),
        }
    }

    #[must_use]
    pub fn attribute(tag: &str, attributes: &[&str], contains: &str) -> Self {
        Self::Attribute {
            tag: tag.to_string(),
            attributes: attributes.iter().map(|a| (*a).to_string()).collect(),
            contains: contains.to_string(),
        }
    }

    #[must_use]
    pub fn text(tag: &str, contains: &str) -> Self {
        Self::Text {
            tag: tag.to_string(),
            contains: contains.to_string(),
        }
    }

    #[must_use]
    pub fn kind(tag: &str, input_type: Option<&str>) -> Self {
        Self::Kind {
            tag: tag.to_string(),
            input_type: input_type.map(str::to_string),
        }
    }

    /// All elements under `scope` matching this rule, in document order.
    ///
    /// Returns an empty list both when nothing matches and when the rule
    /// cannot be evaluated against this scope.
    #[must_use]
    pub fn select_all<'a>(&self, scope: &Selection<'a>) -> Vec<Selection<'a>> {
        match self {
            Self::Css { selector } => candidates(scope, selector),
            Self::Attribute {
                tag,
                attributes,
                contains,
            } => {
                let needle = contains.to_lowercase();
                candidates(scope, tag)
                    .into_iter()
                    .filter(|el| {
                        attributes.iter().any(|name| {
                            dom::get_attribute(el, name)
                                .is_some_and(|v| v.to_lowercase().contains(&needle))
                        })
                    })
                    .collect()
            }
            Self::Text { tag, contains } => {
                let needle = contains.to_lowercase();
                candidates(scope, tag)
                    .into_iter()
                    .filter(|el| visible_label(el).to_lowercase().contains(&needle))
                    .collect()
            }
            Self::Kind { tag, input_type } => candidates(scope, tag)
                .into_iter()
                .filter(|el| match input_type {
                    None => true,
                    Some(wanted) => dom::get_attribute(el, "type")
                        .unwrap_or_else(|| "text".to_string())
                        .eq_ignore_ascii_case(wanted),
                })
                .collect(),
        }
    }

    /// First element under `scope` matching this rule.
    #[must_use]
    pub fn select_first<'a>(&self, scope: &Selection<'a>) -> Option<Selection<'a>> {
        self.select_all(scope).into_iter().next()
    }
}

impl fmt::Display for SelectorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css { selector } => write!(f, "css({selector})"),
            Self::Attribute {
                tag,
                attributes,
                contains,
            } => write!(f, "{tag}[{}~{contains:?}]", attributes.join("|")),
            Self::Text { tag, contains } => write!(f, "{tag}(text~{contains:?})"),
            Self::Kind {
                tag,
                input_type: Some(t),
            } => write!(f, "{tag}[type={t}]"),
            Self::Kind {
                tag,
                input_type: None,
            } => write!(f, "{tag}"),
        }
    }
}

fn candidates<'a>(scope: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    dom::try_query_all(scope, selector)
        .map(|found| found.nodes().iter().map(|n| Selection::from(*n)).collect())
        .unwrap_or_default()
}

/// Text a user would read on the element: inner text, or `value` for inputs.
fn visible_label(el: &Selection) -> String {
    if dom::tag_name(el).as_deref() == Some("input") {
        dom::get_attribute(el, "value").unwrap_or_default()
    } else {
        dom::clean_text(el)
    }
}

/// Locate the first element matched by the highest-priority matching rule.
///
/// Rules are evaluated strictly in order. Rule failures are logged and treated
/// as no match. Returns `None` only when every rule came up empty.
pub fn locate<P: Page + ?Sized>(
    page: &P,
    rules: &[SelectorRule],
    scope: Option<&P::Element>,
) -> Option<P::Element> {
    rules.iter().enumerate().find_map(|(priority, rule)| {
        match page.find_all(rule, scope) {
            Ok(found) => {
                let first = found.into_iter().next();
                if first.is_some() {
                    debug!(%rule, priority, "selector rule matched");
                } else {
                    trace!(%rule, priority, "selector rule found nothing");
                }
                first
            }
            Err(err) => {
                debug!(%rule, priority, error = %err, "selector rule failed; trying next");
                None
            }
        }
    })
}

/// Locate within a parsed snapshot rather than through a page collaborator.
#[must_use]
pub fn locate_in<'a>(scope: &Selection<'a>, rules: &[SelectorRule]) -> Option<Selection<'a>> {
    rules.iter().find_map(|rule| rule.select_first(scope))
}

/// Union of every rule's matches, in rule order, each element listed once.
#[must_use]
pub fn select_any<'a>(scope: &Selection<'a>, rules: &[SelectorRule]) -> Vec<Selection<'a>> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for rule in rules {
        for el in rule.select_all(scope) {
            let Some(id) = el.nodes().first().map(|n| n.id) else {
                continue;
            };
            if !seen.contains(&id) {
                seen.push(id);
                out.push(el);
            }
        }
    }
    out
}
