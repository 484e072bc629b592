//! Key-value document storage.

use std::collections::HashMap;

use super::DbResult;

/// Durable key → JSON document storage.
pub trait DocumentStore {
    /// Read the document stored under `key`, if any.
    fn get_document(&self, key: &str) -> DbResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous document.
    fn put_document(&mut self, key: &str, value: &str) -> DbResult<()>;
}

/// Volatile store for hosts without a writable file system, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DocumentStore for MemoryStore {
    fn get_document(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn put_document(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.documents.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Store whose every read and write fails.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl DocumentStore for FailingStore {
    fn get_document(&self, _key: &str) -> DbResult<Option<String>> {
        Err(super::DbError::Unavailable("disk gone".into()))
    }

    fn put_document(&mut self, _key: &str, _value: &str) -> DbResult<()> {
        Err(super::DbError::Unavailable("disk gone".into()))
    }
}
