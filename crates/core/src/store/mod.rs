//! Persistent storage of named templates.
//!
//! The CLI only depends on the [`TemplateStore`] trait; [`SqliteStore`] is the
//! concrete backend, a single SQLite file at a fixed default location.

mod schema;
mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

pub use sqlite::SqliteStore;

/// A template record as persisted: its unique name and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTemplate {
    pub name: String,
    pub template: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("template store unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("a template named '{0}' already exists")]
    NameConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// CRUD operations over named templates.
pub trait TemplateStore {
    /// Look up a template by name.
    fn find_by_name(&self, name: &str) -> Result<Option<StoredTemplate>, StoreError>;

    /// Insert a new template. Fails with [`StoreError::NameConflict`] if the
    /// name is taken, leaving the existing record untouched.
    fn insert(&self, name: &str, template: &str) -> Result<(), StoreError>;

    /// Delete a template by name. Returns whether a record was removed;
    /// deleting an unknown name is not an error.
    fn delete_by_name(&self, name: &str) -> Result<bool, StoreError>;

    /// Number of stored templates.
    fn count(&self) -> Result<u64, StoreError>;

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_name(name)?.is_some())
    }
}
