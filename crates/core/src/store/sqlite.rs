//! SQLite-backed template store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::{debug, info};

use super::schema::init_schema;
use super::{StoreError, StoredTemplate, TemplateStore};

/// Template store handle over a single SQLite file.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at `path`.
    ///
    /// Any failure to reach the database, including waiting longer than
    /// `timeout` for a lock, is reported as [`StoreError::Unavailable`].
    pub fn open(path: &Path, timeout: Duration) -> Result<Self, StoreError> {
        let unavailable = |reason: String| StoreError::Unavailable {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| unavailable(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;
        conn.busy_timeout(timeout).map_err(|e| unavailable(e.to_string()))?;
        init_schema(&conn).map_err(|e| unavailable(e.to_string()))?;

        debug!("opened template store at {}", path.display());
        Ok(Self { conn, path: path.to_path_buf() })
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn, path: PathBuf::from(":memory:") })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn classify(&self, e: rusqlite::Error) -> StoreError {
        match e.sqlite_error_code() {
            Some(
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::NotADatabase,
            ) => StoreError::Unavailable { path: self.path.clone(), reason: e.to_string() },
            _ => StoreError::Database(e),
        }
    }
}

impl TemplateStore for SqliteStore {
    fn find_by_name(&self, name: &str) -> Result<Option<StoredTemplate>, StoreError> {
        self.conn
            .query_row(
                "SELECT name, template FROM templates WHERE name = ?1",
                [name],
                |row| Ok(StoredTemplate { name: row.get(0)?, template: row.get(1)? }),
            )
            .optional()
            .map_err(|e| self.classify(e))
    }

    fn insert(&self, name: &str, template: &str) -> Result<(), StoreError> {
        match self.conn.execute(
            "INSERT INTO templates (name, template) VALUES (?1, ?2)",
            params![name, template],
        ) {
            Ok(_) => {
                info!(template = name, "stored template");
                Ok(())
            }
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Err(StoreError::NameConflict(name.to_string()))
            }
            Err(e) => Err(self.classify(e)),
        }
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let rows = self
            .conn
            .execute("DELETE FROM templates WHERE name = ?1", [name])
            .map_err(|e| self.classify(e))?;
        debug!(template = name, rows, "deleted template");
        Ok(rows > 0)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM templates", [], |row| row.get(0))
            .map_err(|e| self.classify(e))?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM templates WHERE name = ?1)",
                [name],
                |row| row.get(0),
            )
            .map_err(|e| self.classify(e))
    }
}
