use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::export::pdf::PdfSettings;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pdf: PdfSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: 1,
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            pdf: PdfSettings::default(),
        }
    }
}

/// Where templates are persisted.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Database file. Defaults to `$XDG_DATA_HOME/coverletter/templates.db`.
    #[serde(default)]
    pub path: Option<String>,
    /// How long to wait for the database before giving up.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: None, timeout_ms: default_timeout_ms() }
    }
}

fn default_timeout_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

// Prompts share the terminal with log output, so stay quiet unless asked.
fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub store_path: PathBuf,
    pub store_timeout: Duration,
    pub logging: LoggingConfig,
    pub pdf: PdfSettings,
}
