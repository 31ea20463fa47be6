//! Record normalization and deduplication.
//!
//! Raw candidates are mapped onto the fixed [`Record`] schema according to the
//! strategy that produced them, then deduplicated: the identity of a record is
//! its `DocumentLink` when it has one, otherwise its `Title`. The first record
//! with a given identity is kept and encounter order is preserved.

use std::collections::HashSet;

use tracing::warn;

use crate::patterns::HAS_LETTER;
use crate::result::{Field, RawCandidate, Record, StrategyKind};

/// Map raw candidates of one strategy run to deduplicated records.
///
/// Candidates of a different strategy than `kind` are dropped with a warning;
/// a result set is always built under a single field mapping.
#[must_use]
pub fn normalize(raw: &[RawCandidate], kind: StrategyKind) -> Vec<Record> {
    let records = raw.iter().filter_map(|candidate| {
        if candidate.kind() == kind {
            Some(to_record(candidate))
        } else {
            warn!(expected = %kind, found = %candidate.kind(), "dropping candidate of another strategy");
            None
        }
    });
    deduplicate(records)
}

/// Keep the first record of every identity, preserving order.
pub fn deduplicate(records: impl IntoIterator<Item = Record>) -> Vec<Record> {
    let mut seen = Identities::default();
    records.into_iter().filter(|record| seen.insert(record)).collect()
}

/// Record identities seen so far: `DocumentLink` when present, else `Title`.
///
/// Links and titles live in separate key spaces. Records with neither are
/// always new.
#[derive(Debug, Default)]
pub struct Identities {
    links: HashSet<String>,
    titles: HashSet<String>,
}

impl Identities {
    /// Remember `record`; `false` when its identity was already seen.
    pub fn insert(&mut self, record: &Record) -> bool {
        match (record.get(Field::DocumentLink), record.get(Field::Title)) {
            (Some(link), _) => self.links.insert(link.to_string()),
            (None, Some(title)) => self.titles.insert(title.to_string()),
            (None, None) => true,
        }
    }

    /// Remember the record `candidate` normalizes to.
    pub fn insert_candidate(&mut self, candidate: &RawCandidate) -> bool {
        self.insert(&to_record(candidate))
    }
}

fn to_record(candidate: &RawCandidate) -> Record {
    let mut record = Record::default();

    match candidate {
        RawCandidate::TableRow { cells, link } => {
            for (field, cell) in Field::TABLE_COLUMNS.iter().zip(cells) {
                record.set(*field, Some(cell.clone()));
            }
            record.set(Field::DocumentLink, link.clone());
        }
        RawCandidate::Link {
            text,
            href,
            position,
            context,
        } => {
            record.set(Field::Title, Some(link_title(text, *position, context.as_deref())));
            record.set(Field::DocumentLink, Some(href.clone()));
        }
        RawCandidate::TextBlock {
            title,
            authors,
            registration,
        } => {
            record.set(Field::Title, Some(title.clone()));
            record.set(Field::Authors, join(authors));
            record.set(Field::RegistrationNumber, join(registration));
        }
    }

    record
}

/// Title for a link: its text, enriched from the surrounding container when
/// the text is empty or a bare number; `Link N` when nothing is available.
fn link_title(text: &str, position: usize, context: Option<&str>) -> String {
    let text = text.trim();
    let context = context.map(str::trim).filter(|c| !c.is_empty());

    match context {
        Some(context) if text.is_empty() => context.to_string(),
        Some(context) if !HAS_LETTER.is_match(text) => format!("{text} - {context}"),
        _ if text.is_empty() => format!("Link {position}"),
        _ => text.to_string(),
    }
}

fn join(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join("; "))
}
