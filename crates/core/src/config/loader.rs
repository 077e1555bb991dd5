use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `config_path`, or from the default location.
    ///
    /// An explicitly given path must exist. When the default file is absent
    /// the built-in defaults are used instead.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            if config_path.is_some() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!("no config at {}, using defaults", path.display());
            return Self::resolve(None, &ConfigFile::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Self::resolve(Some(path), &cf)
    }

    fn resolve(
        source: Option<PathBuf>,
        cf: &ConfigFile,
    ) -> Result<ResolvedConfig, ConfigError> {
        let store_path = match &cf.store.path {
            Some(p) => expand_path(p)?,
            None => default_store_path(),
        };

        let logging = if let Some(ref file) = cf.logging.file {
            LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            cf.logging.clone()
        };

        Ok(ResolvedConfig {
            source,
            store_path,
            store_timeout: Duration::from_millis(cf.store.timeout_ms),
            logging,
            pdf: cf.pdf.clone(),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("coverletter").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("coverletter").join("config.toml")
}

/// Default template database: `$XDG_DATA_HOME/coverletter/templates.db`.
pub fn default_store_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        return Path::new(&xdg).join("coverletter").join("templates.db");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".local").join("share").join("coverletter").join("templates.db")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
