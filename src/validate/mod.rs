use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::models::{Document, FieldValue, Record};
use crate::schema::{FieldSpec, RecordSchema, ValueKind};

/// Violations is the full validation report: an ordered mapping from
/// field path (e.g. `interfaces[2].access_vlan`) to every message
/// recorded for that field.
///
/// Order is deterministic: schema declaration order, then list index
/// order, then check order, with unknown document keys appended last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    entries: Vec<(String, Vec<String>)>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field path, appending to the existing
    /// entry if the path was already reported.
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let path = path.into();
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, messages)) => messages.push(message.into()),
            None => self.entries.push((path, vec![message.into()])),
        }
    }

    /// Messages recorded for a field path.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, messages)| messages.as_slice())
    }

    /// True if the path has at least one recorded message.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of field paths with violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (path, messages) entries in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, messages)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", path, messages.join("; "))?;
        }
        Ok(())
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, messages) in &self.entries {
            map.serialize_entry(path, messages)?;
        }
        map.end()
    }
}

/// ValidDocument witnesses that a document passed schema validation.
/// The renderer only accepts this type, so an unvalidated document
/// cannot reach the template engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDocument {
    doc: Document,
}

impl ValidDocument {
    /// Validate `doc` and wrap it on success. This is the escape hatch
    /// for documents arriving through the JSON contract rather than the
    /// merge pipeline; a failure here is a caller bug, reported as
    /// [`PreconditionViolation`].
    pub fn from_document(
        doc: Document,
        schema: &RecordSchema,
    ) -> Result<Self, PreconditionViolation> {
        validate(&doc, schema).into_valid()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }
}

/// PreconditionViolation: a render-stage entry point was handed a
/// document that never passed validation. Programmer error, fatal.
#[derive(Debug, Clone, Error)]
#[error("document has not passed schema validation:\n{violations}")]
pub struct PreconditionViolation {
    pub violations: Violations,
}

/// ValidationResult: the accept decision, or the complete error report.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    Valid(ValidDocument),
    Invalid(Violations),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The violation report, if validation failed.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(violations) => Some(violations),
        }
    }

    /// Unwrap the validated document, or surface the report as a
    /// [`PreconditionViolation`].
    pub fn into_valid(self) -> Result<ValidDocument, PreconditionViolation> {
        match self {
            ValidationResult::Valid(doc) => Ok(doc),
            ValidationResult::Invalid(violations) => {
                Err(PreconditionViolation { violations })
            }
        }
    }
}

const MSG_MISSING: &str = "missing required field";
const MSG_EMPTY: &str = "must not be empty";
const MSG_NOT_SCALAR: &str = "must be a string";
const MSG_NOT_RECORDS: &str = "must be a list of records";
const MSG_UNKNOWN: &str = "unknown field";

/// Validate a merged document against a record schema.
///
/// Every check for every field runs to completion; the report aggregates
/// all violations across the document and every nested record in one
/// pass. Pure and deterministic: the same document always produces the
/// same result.
pub fn validate(doc: &Document, schema: &RecordSchema) -> ValidationResult {
    let mut out = Violations::new();

    for spec in schema.fields() {
        match doc.get(spec.name) {
            None => {
                if spec.required {
                    out.push(spec.name, MSG_MISSING);
                }
            }
            Some(value) => check_field(spec, value, doc, &mut out),
        }
    }

    // Keys the schema does not declare. Document iteration is key-ordered,
    // so these stay deterministic too.
    for (key, _) in doc.iter() {
        if !schema.contains(key) {
            out.push(key.as_str(), MSG_UNKNOWN);
        }
    }

    if out.is_empty() {
        ValidationResult::Valid(ValidDocument { doc: doc.clone() })
    } else {
        ValidationResult::Invalid(out)
    }
}

fn check_field(spec: &FieldSpec, value: &FieldValue, doc: &Document, out: &mut Violations) {
    match (&spec.kind, value) {
        (ValueKind::Scalar, FieldValue::Scalar(s)) => {
            let present_non_empty =
                |name: &str| doc.scalar(name).is_some_and(|v| !v.is_empty());
            check_scalar(spec.name, spec, s, &present_non_empty, out);
        }
        (ValueKind::Scalar, FieldValue::Records(_)) => {
            out.push(spec.name, MSG_NOT_SCALAR);
        }
        (ValueKind::Records(nested), FieldValue::Records(rows)) => {
            check_rows(spec.name, nested(), rows, out);
        }
        (ValueKind::Records(_), FieldValue::Scalar(_)) => {
            out.push(spec.name, MSG_NOT_RECORDS);
        }
    }
}

fn check_rows(section: &str, schema: &RecordSchema, rows: &[Record], out: &mut Violations) {
    for (index, row) in rows.iter().enumerate() {
        for spec in schema.fields() {
            let path = format!("{section}[{index}].{}", spec.name);
            match row.get(spec.name) {
                None => {
                    if spec.required {
                        out.push(path, MSG_MISSING);
                    }
                }
                Some(value) => {
                    let present_non_empty =
                        |name: &str| row.get(name).is_some_and(|v| !v.is_empty());
                    check_scalar(&path, spec, value, &present_non_empty, out);
                }
            }
        }
        for key in row.keys() {
            if !schema.contains(key) {
                out.push(format!("{section}[{index}].{key}"), MSG_UNKNOWN);
            }
        }
    }
}

/// Run the per-value checks for one present scalar. `present_non_empty`
/// resolves dependency names within the enclosing record scope.
fn check_scalar(
    path: &str,
    spec: &FieldSpec,
    value: &str,
    present_non_empty: &dyn Fn(&str) -> bool,
    out: &mut Violations,
) {
    if value.is_empty() {
        if !spec.allow_empty {
            out.push(path, MSG_EMPTY);
        }
        // An allowed empty value satisfies the field; the remaining
        // checks only apply to actual values.
        return;
    }

    if let Some(allowed) = spec.allowed {
        if !allowed.contains(&value) {
            out.push(
                path,
                format!(
                    "unallowed value {value:?} (expected one of: {})",
                    allowed.join(", ")
                ),
            );
        }
    }

    if let Some(pattern) = &spec.pattern {
        if !pattern.is_match(value) {
            out.push(
                path,
                format!("value {value:?} does not match pattern {:?}", pattern.as_str()),
            );
        }
    }

    if let Some(range) = &spec.range {
        let in_range = value.parse::<u64>().is_ok_and(|n| range.contains(&n));
        if !in_range {
            out.push(
                path,
                format!(
                    "must be an integer between {} and {}",
                    range.start(),
                    range.end()
                ),
            );
        }
    }

    for dep in spec.dependencies {
        if !present_non_empty(dep) {
            out.push(path, format!("requires field {dep:?} to be set"));
        }
    }
}
