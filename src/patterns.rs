//! Compiled regex patterns used by the extraction strategies.
//!
//! All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches a leading `Label:` prefix on a text line, e.g. `Авторы: Иванов И.И.`.
///
/// The label is limited to 40 characters so a colon deep inside a value
/// (a time, a URL) does not swallow the value itself.
pub static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^:]{1,40}:\s*").expect("LABEL_PREFIX regex")
});

/// Matches text containing at least one letter in any script.
pub static HAS_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}").expect("HAS_LETTER regex")
});

/// Matches a `==Name==` section header line. Group 1 is the name, group 2
/// whatever follows the header on the same line.
pub static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*==\s*(.*?)\s*==\s*(.*)$").expect("SECTION_HEADER regex")
});

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Strip a leading `Label:` prefix, returning the value part.
///
/// Lines without a label, or whose value would be empty, are returned trimmed.
#[must_use]
pub fn strip_label(line: &str) -> &str {
    let line = line.trim();
    match LABEL_PREFIX.find(line) {
        Some(m) if m.end() < line.len() => line[m.end()..].trim(),
        _ => line,
    }
}
