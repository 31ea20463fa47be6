//! Record types for extraction output.
//!
//! A [`Record`] has a fixed schema of eight fields. Fields that the page did
//! not provide are `None` internally and read back (and serialize) as the
//! [`NOT_SPECIFIED`] sentinel, so every record of a result set exposes the same
//! field set.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Value reported for a schema field the page did not provide.
pub const NOT_SPECIFIED: &str = "not specified";

/// The schema fields of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Authors,
    RegistrationNumber,
    ApplicationNumber,
    RightsHolder,
    FilingDate,
    RegistrationDate,
    DocumentLink,
}

impl Field {
    /// Every field, in schema order.
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Authors,
        Field::RegistrationNumber,
        Field::ApplicationNumber,
        Field::RightsHolder,
        Field::FilingDate,
        Field::RegistrationDate,
        Field::DocumentLink,
    ];

    /// Fields filled positionally from result table columns 1..7.
    pub const TABLE_COLUMNS: [Field; 7] = [
        Field::Title,
        Field::Authors,
        Field::RegistrationNumber,
        Field::ApplicationNumber,
        Field::RightsHolder,
        Field::FilingDate,
        Field::RegistrationDate,
    ];

    /// Schema name, used as the CSV header and JSON key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Authors => "Authors",
            Field::RegistrationNumber => "RegistrationNumber",
            Field::ApplicationNumber => "ApplicationNumber",
            Field::RightsHolder => "RightsHolder",
            Field::FilingDate => "FilingDate",
            Field::RegistrationDate => "RegistrationDate",
            Field::DocumentLink => "DocumentLink",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One extracted registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub registration_number: Option<String>,
    pub application_number: Option<String>,
    pub rights_holder: Option<String>,
    pub filing_date: Option<String>,
    pub registration_date: Option<String>,
    /// Absolute URL on the repository domain.
    pub document_link: Option<String>,
}

impl Record {
    /// Field value, or `None` when unset.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Authors => self.authors.as_deref(),
            Field::RegistrationNumber => self.registration_number.as_deref(),
            Field::ApplicationNumber => self.application_number.as_deref(),
            Field::RightsHolder => self.rights_holder.as_deref(),
            Field::FilingDate => self.filing_date.as_deref(),
            Field::RegistrationDate => self.registration_date.as_deref(),
            Field::DocumentLink => self.document_link.as_deref(),
        }
    }

    /// Field value, or [`NOT_SPECIFIED`] when unset.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.get(field).unwrap_or(NOT_SPECIFIED)
    }

    /// Set a field. Blank values are stored as unset.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Authors => &mut self.authors,
            Field::RegistrationNumber => &mut self.registration_number,
            Field::ApplicationNumber => &mut self.application_number,
            Field::RightsHolder => &mut self.rights_holder,
            Field::FilingDate => &mut self.filing_date,
            Field::RegistrationDate => &mut self.registration_date,
            Field::DocumentLink => &mut self.document_link,
        };
        *slot = value;
    }

    /// `(field name, value)` pairs in schema order, sentinel included.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Field::ALL.iter().map(move |f| (f.name(), self.value(*f)))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Record", Field::ALL.len())?;
        for field in Field::ALL {
            state.serialize_field(field.name(), self.value(field))?;
        }
        state.end()
    }
}

/// Which extraction strategy produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Table,
    Link,
    Text,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Table => "table",
            StrategyKind::Link => "link",
            StrategyKind::Text => "text",
        })
    }
}

/// Strategy-local intermediate unit, discarded after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCandidate {
    /// Cell texts of a result table row plus the row's resolved link.
    TableRow {
        cells: Vec<String>,
        link: Option<String>,
    },
    /// A document hyperlink. `position` is 1-based among unique links.
    Link {
        text: String,
        href: String,
        position: usize,
        context: Option<String>,
    },
    /// A block of free text started by an indicator line.
    TextBlock {
        title: String,
        authors: Vec<String>,
        registration: Vec<String>,
    },
}

impl RawCandidate {
    /// Strategy this candidate belongs to.
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        match self {
            RawCandidate::TableRow { .. } => StrategyKind::Table,
            RawCandidate::Link { .. } => StrategyKind::Link,
            RawCandidate::TextBlock { .. } => StrategyKind::Text,
        }
    }
}

/// Ordered, deduplicated, capped records of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Strategy that produced the records; `None` when every strategy failed.
    pub strategy: Option<StrategyKind>,
    pub records: Vec<Record>,
}

impl ResultSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_read_as_sentinel() {
        let mut record = Record::default();
        record.set(Field::Title, Some("  Patent X ".to_string()));
        record.set(Field::Authors, Some("   ".to_string()));

        assert_eq!(record.value(Field::Title), "Patent X");
        assert_eq!(record.get(Field::Authors), None);
        assert_eq!(record.value(Field::Authors), NOT_SPECIFIED);
    }

    #[test]
    fn test_serialize_emits_every_field() {
        let mut record = Record::default();
        record.set(Field::Title, Some("Патент".to_string()));
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 8);
        assert_eq!(object["Title"], "Патент");
        assert_eq!(object["DocumentLink"], NOT_SPECIFIED);
    }

    #[test]
    fn test_pairs_follow_schema_order() {
        let names: Vec<_> = Record::default().pairs().map(|(n, _)| n).collect();
        let expected: Vec<_> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_candidate_kind() {
        let raw = RawCandidate::TextBlock {
            title: "x".into(),
            authors: vec![],
            registration: vec![],
        };
        assert_eq!(raw.kind(), StrategyKind::Text);
    }
}
