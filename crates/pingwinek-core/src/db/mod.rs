//! Storage layer for pingwinek.
//!
//! Every persisted collection is a single JSON document in the `key_values`
//! table, addressed by one of the [`StorageKeys`](crate::StorageKeys).

mod documents;
mod schema;

pub use documents::*;
pub use schema::*;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// SQLite-backed [`DocumentStore`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the document database at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        debug!(path = %path.as_ref().display(), "opening document database");
        Self::with_connection(Connection::open(path)?)
    }

    /// Documents that vanish with the process.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl DocumentStore for Database {
    fn get_document(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM key_values WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn put_document(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO key_values (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}
