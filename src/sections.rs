//! Sectioned text reports.
//!
//! A report is plain text split into named sections by `==Name==` header
//! lines. Two section shapes turn into tables: an `Items` section of
//! space-separated `parameter:value` tokens, laid out two pairs per row, and
//! a `Data` section whose lines are whitespace-separated cells.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::patterns::SECTION_HEADER;

/// Placeholder for a missing parameter or value cell.
pub const EMPTY_CELL: &str = "-empty-";

/// Header row of an items table.
pub const ITEMS_HEADER: [&str; 4] = ["Parameter", "Value", "Parameter", "Value"];

/// A named section and its non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub lines: Vec<String>,
}

/// What to do with the last item of an odd-length items list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OddItems {
    /// Keep it, padding the second pair of its row with [`EMPTY_CELL`].
    #[default]
    Pad,
    /// Fail with [`Error::OddCount`].
    Reject,
}

/// Split `content` into sections, in order of appearance.
///
/// Text before the first header is ignored. Blank lines are dropped and
/// trailing whitespace and tabs are stripped. A repeated section name keeps
/// both sections.
#[must_use]
pub fn parse_sections(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in content.lines() {
        if let Some(caps) = SECTION_HEADER.captures(line) {
            let mut section = Section {
                name: caps[1].to_string(),
                lines: Vec::new(),
            };
            push_line(&mut section.lines, &caps[2]);
            sections.push(section);
        } else if let Some(section) = sections.last_mut() {
            push_line(&mut section.lines, line);
        }
    }

    debug!(sections = sections.len(), "report parsed");
    sections
}

/// Read and parse a report file.
pub fn read_sections(path: impl AsRef<Path>) -> Result<Vec<Section>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_sections(&content))
}

/// First section called `name`.
#[must_use]
pub fn find<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.name == name)
}

/// Lay out `parameter:value` tokens two pairs per row, under [`ITEMS_HEADER`].
///
/// Tokens are separated by whitespace, across lines. A token without a colon
/// has an empty value.
///
/// # Errors
///
/// [`Error::OddCount`] when the token count is odd and `policy` is
/// [`OddItems::Reject`].
pub fn items_table(lines: &[String], policy: OddItems) -> Result<Vec<Vec<String>>> {
    let pairs: Vec<(String, String)> = lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .map(split_item)
        .collect();

    if pairs.len() % 2 == 1 && policy == OddItems::Reject {
        return Err(Error::OddCount(pairs.len()));
    }

    let mut table: Vec<Vec<String>> = vec![ITEMS_HEADER.iter().map(|h| (*h).to_string()).collect()];
    for chunk in pairs.chunks(2) {
        let mut row = Vec::with_capacity(4);
        for (parameter, value) in chunk {
            row.push(parameter.clone());
            row.push(value.clone());
        }
        while row.len() < 4 {
            row.push(EMPTY_CELL.to_string());
        }
        table.push(row);
    }
    Ok(table)
}

/// One row per line, one cell per whitespace-separated word.
#[must_use]
pub fn data_table(lines: &[String]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

fn push_line(lines: &mut Vec<String>, line: &str) {
    let line = line.replace('\t', "");
    let line = line.trim_end();
    if !line.trim().is_empty() {
        lines.push(line.to_string());
    }
}

fn split_item(token: &str) -> (String, String) {
    match token.split_once(':') {
        Some((parameter, value)) => (parameter.to_string(), value.to_string()),
        None => (token.to_string(), String::new()),
    }
}
