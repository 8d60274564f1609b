mod config;
mod generator;
mod merge;
mod models;
mod render;
mod schema;
mod sheets;
mod validate;

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use generator::GenerateError;
use render::Renderer;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switch_forge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::load();
    tracing::info!("Starting SwitchForge");
    tracing::info!("Sheets: {}", cfg.sheets_dir);
    tracing::info!("Template: {}", cfg.template_path);
    tracing::info!("Output: {}", cfg.output_dir);

    let sheets = sheets::load(&cfg)?;
    tracing::info!(
        vlans = sheets.vlans.len(),
        etherchannels = sheets.etherchannels.len(),
        interfaces = sheets.interfaces.len(),
        "sheets loaded"
    );

    let template = fs::read_to_string(&cfg.template_path)
        .with_context(|| format!("cannot read template {}", cfg.template_path))?;
    let renderer = Renderer::from_template(&template)?;

    let generated = match generator::generate(
        &renderer,
        sheets.params,
        sheets.vlans,
        sheets.etherchannels,
        sheets.interfaces,
    ) {
        Ok(generated) => generated,
        Err(GenerateError::Validation(violations)) => {
            for (path, messages) in violations.iter() {
                tracing::error!("{}: {}", path, messages.join("; "));
            }
            anyhow::bail!(
                "configuration failed validation ({} fields); nothing written",
                violations.len()
            );
        }
        Err(e) => return Err(e.into()),
    };

    let output_dir = Path::new(&cfg.output_dir);
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("cannot create output directory {}", cfg.output_dir))?;
    }
    let output_path = output_dir.join(format!("{}.txt", generated.basename));
    fs::write(&output_path, &generated.text)
        .with_context(|| format!("cannot write {}", output_path.display()))?;

    tracing::info!("Configuration file '{}' is created", output_path.display());
    Ok(())
}
