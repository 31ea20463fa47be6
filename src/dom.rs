//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the locator, classifier and
//! extraction strategies. Every page snapshot is parsed fresh, so nothing here
//! caches across calls.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::patterns::normalize_whitespace;

/// Elements that break visible text onto a new line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get the tag name of a raw node (lowercase, empty for non-elements).
#[must_use]
pub fn node_tag(node: &NodeRef) -> String {
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with whitespace collapsed to single spaces.
#[must_use]
pub fn clean_text(sel: &Selection) -> String {
    normalize_whitespace(&text_content(sel))
}

/// Visible text of an element as a browser would lay it out: one line per block.
///
/// Script, style and similar hidden elements are skipped. Lines are
/// whitespace-normalized and empty lines are dropped.
#[must_use]
pub fn visible_lines(sel: &Selection) -> Vec<String> {
    let mut raw = String::new();
    for node in sel.nodes() {
        push_visible_text(node, &mut raw);
    }

    raw.lines()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Visible text of the whole document body (falls back to the root when the
/// document has no body element).
#[must_use]
pub fn page_lines(doc: &Document) -> Vec<String> {
    let body = doc.select("body");
    if body.exists() {
        visible_lines(&body)
    } else {
        visible_lines(&doc.select("html"))
    }
}

fn push_visible_text(node: &NodeRef, out: &mut String) {
    if node.is_text() {
        out.push_str(&node.text());
        return;
    }
    if !node.is_element() && !node.is_document() {
        return;
    }

    let tag = node_tag(node);
    if HIDDEN_ELEMENTS.contains(&tag.as_str()) {
        return;
    }

    let is_block = BLOCK_ELEMENTS.contains(&tag.as_str());
    if is_block {
        out.push('\n');
    }
    for child in node.children() {
        push_visible_text(&child, out);
    }
    if is_block {
        out.push('\n');
    }
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Nearest ancestor `<table>` of a node, if any.
#[must_use]
pub fn enclosing_table<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if node_tag(&parent) == "table" {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

// === Querying ===

/// Query all elements by CSS selector, returning `None` when the selector is
/// invalid or matches nothing.
#[inline]
#[must_use]
pub fn try_query_all<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    sel.try_select(selector)
}
