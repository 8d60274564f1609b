use std::path::Path;

use anyhow::Context as _;

use crate::config::Config;
use crate::models::Record;

/// Sheets holds the four decoded CSV row-sets, ready for merging.
#[derive(Debug, Clone)]
pub struct Sheets {
    pub params: Record,
    pub vlans: Vec<Record>,
    pub etherchannels: Vec<Record>,
    pub interfaces: Vec<Record>,
}

/// Load all four sheets from the configured locations.
pub fn load(config: &Config) -> anyhow::Result<Sheets> {
    Ok(Sheets {
        params: read_params(&config.params_path())?,
        vlans: read_rows(&config.vlans_path())?,
        etherchannels: read_rows(&config.etherchannels_path())?,
        interfaces: read_rows(&config.port_mapping_path())?,
    })
}

/// Read a sheet into ordered string-keyed records. Header row names the
/// columns; every cell stays a string, typing is schema-level.
pub fn read_rows(path: &Path) -> anyhow::Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open sheet {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result
            .with_context(|| format!("malformed row in {}", path.display()))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.trim().to_string(), cell.trim().to_string()))
            .collect();
        rows.push(record);
    }
    Ok(rows)
}

/// Read the parameters sheet: a single scalar record. When the sheet
/// carries several data rows the last one wins, matching the historical
/// sheet format.
pub fn read_params(path: &Path) -> anyhow::Result<Record> {
    read_rows(path)?
        .pop()
        .with_context(|| format!("parameters sheet {} has no data rows", path.display()))
}
