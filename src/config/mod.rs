use std::env;
use std::path::PathBuf;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub sheets_dir: String,
    pub params_file: String,
    pub vlans_file: String,
    pub etherchannels_file: String,
    pub port_mapping_file: String,
    pub template_path: String,
    pub output_dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            sheets_dir: get_env("SHEETS_DIR", "sheets"),
            params_file: get_env("PARAMS_FILE", "01_params.csv"),
            vlans_file: get_env("VLANS_FILE", "02_vlans.csv"),
            etherchannels_file: get_env("ETHERCHANNELS_FILE", "03_etherchannels.csv"),
            port_mapping_file: get_env("PORT_MAPPING_FILE", "04_port_mapping.csv"),
            template_path: get_env("TEMPLATE_PATH", "templates/switch.tera"),
            output_dir: get_env("OUTPUT_DIR", "configs"),
        }
    }

    pub fn params_path(&self) -> PathBuf {
        PathBuf::from(&self.sheets_dir).join(&self.params_file)
    }

    pub fn vlans_path(&self) -> PathBuf {
        PathBuf::from(&self.sheets_dir).join(&self.vlans_file)
    }

    pub fn etherchannels_path(&self) -> PathBuf {
        PathBuf::from(&self.sheets_dir).join(&self.etherchannels_file)
    }

    pub fn port_mapping_path(&self) -> PathBuf {
        PathBuf::from(&self.sheets_dir).join(&self.port_mapping_file)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
