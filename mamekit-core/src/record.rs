use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_for_xml_value;

/// Description used for software entries that carry none.
pub const NO_DESCRIPTION: &str = "No Description";

/// A single machine entry from a MAME `-listxml` catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineRecord {
    /// Short machine name (e.g., "pacman"). Empty when the catalog omitted it.
    pub name: String,
    pub description: String,
    pub manufacturer: Option<String>,
    /// Release year as written in the catalog; may contain `?` (e.g., "198?").
    pub year: Option<String>,
    /// Driver source file (e.g., "namco/pacman.cpp").
    pub source_file: Option<String>,
    /// Parent machine name when this entry is a clone.
    pub clone_of: Option<String>,
    /// Driver emulation status (e.g., "good", "imperfect", "preliminary").
    pub emulation_status: String,
}

impl MachineRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub fn with_clone_of(mut self, parent: impl Into<String>) -> Self {
        self.clone_of = Some(parent.into());
        self
    }

    pub fn with_emulation_status(mut self, status: impl Into<String>) -> Self {
        self.emulation_status = status.into();
        self
    }

    /// Records without a name never reach a derived output.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn is_clone(&self) -> bool {
        self.clone_of.is_some()
    }

    pub fn is_good(&self) -> bool {
        self.emulation_status == "good"
    }

    /// Normalized two-field form written to record-set files.
    pub fn to_record(&self) -> Record {
        Record::normalized(&self.name, &self.description)
    }
}

/// A single entry from a MAME software list (`hash/*.xml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareRecord {
    pub name: String,
    pub description: String,
}

impl SoftwareRecord {
    /// Create a software record, substituting [`NO_DESCRIPTION`] when the
    /// description is missing.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }

    pub fn to_record(&self) -> Record {
        Record::normalized(&self.name, &self.description)
    }
}

/// The normalized `(name, description)` pair stored in record-set files and
/// DAT archives. Serialized as a two-element array, name first; only that
/// form is accepted back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Record {
    pub name: String,
    pub description: String,
}

impl From<(String, String)> for Record {
    fn from((name, description): (String, String)) -> Self {
        Self { name, description }
    }
}

impl Record {
    /// Build a record from already-normalized values.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Build a record, collapsing whitespace and decoding `&amp;` in both fields.
    pub fn normalized(name: &str, description: &str) -> Self {
        Self {
            name: sanitize_for_xml_value(name),
            description: sanitize_for_xml_value(description),
        }
    }
}

/// An ordered sequence of records. Insertion order is preserved everywhere;
/// nothing sorts or de-duplicates a record set implicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append every record of `other`, keeping its order.
    pub fn append(&mut self, other: RecordSet) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for RecordSet {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
