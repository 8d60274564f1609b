use thiserror::Error;

use crate::merge::{merge, MergeConflict};
use crate::models::Record;
use crate::render::{output_basename, Renderer, RenderError};
use crate::schema::registry;
use crate::validate::{validate, Violations};

/// GeneratedConfig is the output of one successful pipeline run.
#[derive(Debug, Clone)]
pub struct GeneratedConfig {
    /// Sanitized artifact basename, `<hostname>_<date>` (no extension).
    pub basename: String,
    /// The rendered configuration text.
    pub text: String,
}

/// GenerateError covers every way a run can fail. Validation failures
/// carry the complete per-field report so every problem can be fixed in
/// one pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Merge(#[from] MergeConflict),

    #[error("configuration failed validation:\n{0}")]
    Validation(Violations),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Run the pipeline: merge the four row-sets, validate the merged
/// document against the canonical schema, and render it.
///
/// Rendering is skipped entirely when validation fails; no output is
/// produced for an invalid document.
pub fn generate(
    renderer: &Renderer,
    params: Record,
    vlans: Vec<Record>,
    etherchannels: Vec<Record>,
    interfaces: Vec<Record>,
) -> Result<GeneratedConfig, GenerateError> {
    let doc = merge(params, vlans, etherchannels, interfaces)?;
    tracing::debug!(fields = doc.len(), "merged document");

    let valid = validate(&doc, registry::device_schema())
        .into_valid()
        .map_err(|e| GenerateError::Validation(e.violations))?;

    let text = renderer.render(&valid)?;
    let basename = output_basename(&valid, chrono::Utc::now().date_naive())?;
    tracing::info!(%basename, bytes = text.len(), "configuration rendered");

    Ok(GeneratedConfig { basename, text })
}
