use chrono::NaiveDate;
use tera::{Context, Tera};
use thiserror::Error;

use crate::validate::ValidDocument;

const TEMPLATE_NAME: &str = "switch";

/// RenderError: template engine failures and unsafe output identifiers.
/// Never swallowed; the underlying tera message is carried verbatim.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// The hostname failed the output-naming safety check. Distinct from
    /// a schema regex failure: this guards the filesystem boundary even
    /// for documents that arrived through the JSON escape hatch.
    #[error("hostname {hostname:?} is not safe to use as an output file name")]
    UnsanitizedIdentifier { hostname: String },
}

/// Renderer feeds a validated document into the template engine.
///
/// Template variables are exactly the document's top-level keys plus the
/// nested records' field names, with the generation timestamp available
/// as `now`.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Build a renderer from template source. Syntax errors surface here,
    /// before any document is processed.
    pub fn from_template(content: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, content)?;
        Ok(Self { tera })
    }

    /// Render the configuration text for a validated document.
    pub fn render(&self, doc: &ValidDocument) -> Result<String, RenderError> {
        let mut context = Context::from_serialize(doc.document())?;
        context.insert(
            "now",
            &chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Compute the output artifact basename, `<hostname>_<date>`.
///
/// The hostname is defensively re-checked before it names a file, even
/// though the schema regex already constrains it.
pub fn output_basename(
    doc: &ValidDocument,
    date: NaiveDate,
) -> Result<String, RenderError> {
    let hostname = doc.document().scalar("hostname").unwrap_or_default();
    if !is_safe_basename(hostname) {
        return Err(RenderError::UnsanitizedIdentifier {
            hostname: hostname.to_string(),
        });
    }
    Ok(format!("{hostname}_{}", date.format("%Y-%m-%d")))
}

/// Validate a string for use as a file name component.
/// Allows alphanumeric, hyphens, and underscores. No path separators,
/// dots, or shell metacharacters.
pub fn is_safe_basename(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::models::Record;
    use crate::schema::registry;
    use crate::validate::validate;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_doc() -> ValidDocument {
        let params = record(&[
            ("hostname", "SW1"),
            ("timezone", "UTC"),
            ("stp_mode", "pvst"),
            ("vtp_mode", "off"),
            ("username", "admin"),
            ("algorithm_type", "sha256"),
            ("password", "x"),
        ]);
        let vlans = vec![record(&[("id", "10"), ("name", "DATA")])];
        let interfaces = vec![record(&[
            ("name", "Gi1/0/1"),
            ("mode", "access"),
            ("access_vlan", "10"),
        ])];
        let doc = merge(params, vlans, Vec::new(), interfaces).unwrap();
        validate(&doc, registry::device_schema()).into_valid().unwrap()
    }

    #[test]
    fn test_render_exposes_document_fields() {
        let renderer = Renderer::from_template(
            "hostname {{ hostname }}\n\
             {% for vlan in vlans %}vlan {{ vlan.id }} {{ vlan.name }}\n{% endfor %}\
             {% for iface in interfaces %}interface {{ iface.name }}\n{% endfor %}",
        )
        .unwrap();
        let text = renderer.render(&valid_doc()).unwrap();
        assert!(text.contains("hostname SW1"));
        assert!(text.contains("vlan 10 DATA"));
        assert!(text.contains("interface Gi1/0/1"));
    }

    #[test]
    fn test_render_injects_timestamp() {
        let renderer = Renderer::from_template("generated {{ now }}").unwrap();
        let text = renderer.render(&valid_doc()).unwrap();
        assert!(text.starts_with("generated 2"));
    }

    #[test]
    fn test_template_syntax_error_surfaces_at_build() {
        let err = Renderer::from_template("{% for %}").unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_missing_variable_is_a_render_error() {
        let renderer = Renderer::from_template("{{ no_such_field }}").unwrap();
        let err = renderer.render(&valid_doc()).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_output_basename_appends_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let basename = output_basename(&valid_doc(), date).unwrap();
        assert_eq!(basename, "SW1_2026-08-07");
    }

    #[test]
    fn test_is_safe_basename() {
        assert!(is_safe_basename("SW1"));
        assert!(is_safe_basename("core-sw_01"));
        assert!(!is_safe_basename(""));
        assert!(!is_safe_basename("sw 1"));
        assert!(!is_safe_basename("sw/1"));
        assert!(!is_safe_basename(".."));
        assert!(!is_safe_basename("../../etc/passwd"));
        assert!(!is_safe_basename("sw\\1"));
        assert!(!is_safe_basename(&"a".repeat(64)));
    }
}
