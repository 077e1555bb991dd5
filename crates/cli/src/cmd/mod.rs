pub mod delete;
pub mod fill;

use coverletter_core::config::types::ResolvedConfig;
use coverletter_core::store::{SqliteStore, StoreError};
use tracing::debug;

/// Open the configured template store.
pub fn open_store(cfg: &ResolvedConfig) -> Result<SqliteStore, StoreError> {
    let store = SqliteStore::open(&cfg.store_path, cfg.store_timeout)?;
    debug!(path = %store.path().display(), "using template store");
    Ok(store)
}

/// Print a store failure, with a hint when the database could not be reached.
pub fn report_store_error(e: &StoreError) {
    eprintln!("{e}");
    if let StoreError::Unavailable { path, .. } = e {
        eprintln!(
            "Timed out or failed opening the template database. \
             Check that {} is a writable location, or pass --db <path>.",
            path.display()
        );
    }
}
