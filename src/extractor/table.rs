//! Table strategy.
//!
//! Every table with more than one row of its own is treated as a result table:
//! the first row is a header and is skipped, the remaining rows map their
//! first seven cells positionally onto the record schema. Rows without a
//! title cell are dropped, and so are rows repeating an earlier record.

use dom_query::{Document, NodeRef, Selection};
use tracing::{debug, trace};

use super::ExtractContext;
use crate::dom;
use crate::normalize::Identities;
use crate::result::RawCandidate;

/// Unique raw candidates from all result tables, capped at `max_records`.
#[must_use]
pub fn extract_tables(doc: &Document, ctx: &ExtractContext) -> Vec<RawCandidate> {
    let mut out = Vec::new();
    let mut seen = Identities::default();

    'tables: for (table_index, table) in doc.select("table").nodes().iter().enumerate() {
        let rows = own_rows(table);
        if rows.len() < 2 {
            continue;
        }
        trace!(table_index, rows = rows.len(), "scanning result table");

        for (row_index, row) in rows.iter().enumerate().skip(1) {
            if out.len() >= ctx.max_records {
                break 'tables;
            }
            match table_row(row, ctx) {
                Some(candidate) if seen.insert_candidate(&candidate) => out.push(candidate),
                Some(_) => trace!(table_index, row_index, "duplicate row skipped"),
                None => trace!(table_index, row_index, "row without title skipped"),
            }
        }
    }

    debug!(candidates = out.len(), "table strategy finished");
    out
}

/// Number of rows belonging directly to `table` (nested tables excluded).
#[must_use]
pub fn own_row_count(table: &NodeRef) -> usize {
    own_rows(table).len()
}

fn own_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    Selection::from(*table)
        .select("tr")
        .nodes()
        .iter()
        .filter(|row| dom::enclosing_table(row).is_some_and(|t| t.id == table.id))
        .copied()
        .collect()
}

fn table_row(row: &NodeRef, ctx: &ExtractContext) -> Option<RawCandidate> {
    let cells: Vec<String> = row
        .children()
        .iter()
        .filter(|cell| matches!(dom::node_tag(cell).as_str(), "td" | "th"))
        .map(|cell| dom::clean_text(&Selection::from(*cell)))
        .collect();

    if cells.first().is_none_or(String::is_empty) {
        return None;
    }

    Some(RawCandidate::TableRow {
        link: row_link(row, ctx),
        cells,
    })
}

/// First link anywhere in the row that resolves to a repository document.
/// Bad hrefs are passed over; a row with none keeps no link but is not dropped.
fn row_link(row: &NodeRef, ctx: &ExtractContext) -> Option<String> {
    Selection::from(*row)
        .select("a[href]")
        .nodes()
        .iter()
        .filter_map(|anchor| dom::get_attribute(&Selection::from(*anchor), "href"))
        .find_map(|href| match ctx.resolver.document_link(&href) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                debug!(error = %err, "row link ignored");
                None
            }
        })
}
