use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved section names for the three repeated-row sheets.
/// These keys always exist in a merged document and may not be
/// used as parameter names.
pub mod section {
    pub const VLANS: &str = "vlans";
    pub const ETHERCHANNELS: &str = "etherchannels";
    pub const INTERFACES: &str = "interfaces";

    pub const ALL: &[&str] = &[VLANS, ETHERCHANNELS, INTERFACES];
}

/// Record represents one decoded sheet row: column name -> cell value.
/// All cell values are strings; numeric and boolean semantics live in
/// the schema, not the storage layer.
pub type Record = BTreeMap<String, String>;

/// FieldValue is a single top-level document value: either a scalar
/// parameter or one of the three repeated-row sections.
///
/// The untagged serde representation keeps the JSON round-trip lossless:
/// scalars serialize as strings, sections as arrays of string-keyed objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Records(Vec<Record>),
}

impl FieldValue {
    /// Returns the scalar string, or None for a record section.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Records(_) => None,
        }
    }

    /// Returns the record rows, or None for a scalar.
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::Records(rows) => Some(rows),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(rows: Vec<Record>) -> Self {
        FieldValue::Records(rows)
    }
}

/// Document represents one merged configuration instance: every device
/// parameter plus the three list sections, keyed by field name.
///
/// A document is constructed once per run (by [`crate::merge::merge`] or
/// by deserializing stored JSON) and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub(crate) fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a scalar field; None if absent or a record section.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_scalar)
    }

    /// Look up a record section; None if absent or a scalar.
    pub fn records(&self, name: &str) -> Option<&[Record]> {
        self.get(name).and_then(FieldValue::as_records)
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to a JSON string. Together with [`Document::from_json`]
    /// this is the lossless structured-text contract the glue layer
    /// round-trips through.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
