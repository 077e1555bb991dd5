use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid path to template: {0}")]
    NotFound(PathBuf),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a template file. Relative paths are resolved against the current
/// working directory.
pub fn read_template_file(path: &Path) -> Result<String, SourceError> {
    let full = absolutize(path);
    if !full.is_file() {
        return Err(SourceError::NotFound(full));
    }

    debug!("reading template from {}", full.display());
    fs::read_to_string(&full).map_err(|source| SourceError::Io { path: full, source })
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(path)
    }
}
