pub mod registry;

use std::ops::RangeInclusive;

use regex_lite::Regex;

pub use registry::device_schema;

/// ValueKind describes the shape a field's value must take.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// A plain string cell.
    Scalar,
    /// An ordered list of sub-records, each validated against the
    /// nested schema the function pointer resolves to.
    Records(fn() -> &'static RecordSchema),
}

/// FieldSpec is one schema entry: the complete set of constraints for a
/// single named field.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    /// The field must be present in the document.
    pub required: bool,
    /// A present scalar may hold the empty string. Empty values on
    /// empty-allowed fields skip the remaining checks.
    pub allow_empty: bool,
    /// Case-sensitive enumeration of accepted values.
    pub allowed: Option<&'static [&'static str]>,
    /// Anchored whole-string pattern the value must match.
    pub pattern: Option<Regex>,
    /// Inclusive bounds for string-encoded integer values.
    pub range: Option<RangeInclusive<u64>>,
    /// Names of sibling fields that must be present and non-empty
    /// whenever this field carries a value.
    pub dependencies: &'static [&'static str],
}

impl FieldSpec {
    /// A scalar field, by default optional with empty values allowed.
    pub fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Scalar,
            required: false,
            allow_empty: true,
            allowed: None,
            pattern: None,
            range: None,
            dependencies: &[],
        }
    }

    /// A list-of-records field validated against a nested schema.
    pub fn records(name: &'static str, nested: fn() -> &'static RecordSchema) -> Self {
        Self {
            name,
            kind: ValueKind::Records(nested),
            required: false,
            allow_empty: true,
            allowed: None,
            pattern: None,
            range: None,
            dependencies: &[],
        }
    }

    /// Mark the field required and its value non-empty.
    pub fn required(mut self) -> Self {
        self.required = true;
        self.allow_empty = false;
        self
    }

    /// Require a non-empty value whenever the field is present.
    pub fn non_empty(mut self) -> Self {
        self.allow_empty = false;
        self
    }

    /// Restrict the value to a fixed set (case-sensitive).
    pub fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    /// Constrain the value to a whole-string regex match. The pattern is
    /// compiled here, anchored on both ends.
    ///
    /// Panics on an invalid pattern; all patterns are static literals
    /// exercised by the registry tests.
    pub fn pattern(mut self, pattern: &str) -> Self {
        let anchored = format!("^(?:{pattern})$");
        self.pattern = Some(
            Regex::new(&anchored)
                .unwrap_or_else(|e| panic!("invalid schema pattern {pattern:?}: {e}")),
        );
        self
    }

    /// Constrain the value to a string-encoded integer in `lo..=hi`.
    pub fn range(mut self, lo: u64, hi: u64) -> Self {
        self.range = Some(lo..=hi);
        self
    }

    /// Require the named sibling fields to be set whenever this field is.
    pub fn depends_on(mut self, fields: &'static [&'static str]) -> Self {
        self.dependencies = fields;
        self
    }
}

/// RecordSchema is an ordered collection of field specs. Declaration
/// order drives the order of the validation report.
#[derive(Debug)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field spec by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if the schema declares a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_anchored() {
        let spec = FieldSpec::scalar("hostname").pattern("[A-Za-z0-9_-]+");
        let re = spec.pattern.as_ref().unwrap();
        assert!(re.is_match("core-sw_01"));
        // A substring match is not enough; the whole value must conform.
        assert!(!re.is_match("bad host"));
        assert!(!re.is_match("../etc"));
    }

    #[test]
    fn test_builder_defaults() {
        let spec = FieldSpec::scalar("vtp_domain");
        assert!(!spec.required);
        assert!(spec.allow_empty);
        assert!(spec.allowed.is_none());
        assert!(spec.pattern.is_none());
        assert!(spec.range.is_none());
        assert!(spec.dependencies.is_empty());
    }

    #[test]
    fn test_required_implies_non_empty() {
        let spec = FieldSpec::scalar("hostname").required();
        assert!(spec.required);
        assert!(!spec.allow_empty);
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = RecordSchema::new(vec![
            FieldSpec::scalar("id").required(),
            FieldSpec::scalar("name"),
        ]);
        assert!(schema.contains("id"));
        assert!(schema.get("name").is_some());
        assert!(schema.get("desc").is_none());
        assert_eq!(schema.fields().len(), 2);
    }
}
