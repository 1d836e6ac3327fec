use funnelcraft_common::{read_json_file, write_json_file};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "funnelcraft.config.json";

/// Funnelcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding saved pages and pipeline order files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Undo levels kept per editor session (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Log level used when no -v flag is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    ".funnelcraft".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Ok(read_json_file(&config_path)?)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn save(&self, cwd: &Path) -> anyhow::Result<PathBuf> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);
        write_json_file(&config_path, self)?;
        Ok(config_path)
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_limit: 0,
            log_level: default_log_level(),
        }
    }
}
