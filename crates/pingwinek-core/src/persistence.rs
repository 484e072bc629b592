//! Persistence gateway.
//!
//! Encodes the persisted collections (children, dose history, temperature
//! log) as JSON arrays under fixed keys. Failures never propagate: a failed
//! load yields an empty collection and a failed save is logged while the
//! in-memory state stays authoritative.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::StorageKeys;
use crate::db::{DbResult, DocumentStore};
use crate::models::{ChildProfile, DoseCalculation, TemperatureEntry};

/// Reads and writes collections through a [`DocumentStore`].
pub struct PersistenceGateway<S> {
    store: S,
    keys: StorageKeys,
    is_loading: bool,
}

impl<S: DocumentStore> PersistenceGateway<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            is_loading: false,
        }
    }

    /// Suppress saves until [`end_load`](Self::end_load).
    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }

    pub fn end_load(&mut self) {
        self.is_loading = false;
    }

    pub fn load_children(&self) -> Vec<ChildProfile> {
        self.load_collection(&self.keys.children)
    }

    pub fn load_history(&self) -> Vec<DoseCalculation> {
        self.load_collection(&self.keys.history)
    }

    pub fn load_temperature_log(&self) -> Vec<TemperatureEntry> {
        self.load_collection(&self.keys.temperature_log)
    }

    pub fn save_children(&mut self, children: &[ChildProfile]) {
        let key = self.keys.children.clone();
        self.save_collection(&key, children);
    }

    pub fn save_history(&mut self, history: &[DoseCalculation]) {
        let key = self.keys.history.clone();
        self.save_collection(&key, history);
    }

    pub fn save_temperature_log(&mut self, entries: &[TemperatureEntry]) {
        let key = self.keys.temperature_log.clone();
        self.save_collection(&key, entries);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_load(key) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "failed to load collection, starting empty");
                Vec::new()
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> DbResult<Vec<T>> {
        match self.store.get_document(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) {
        if self.is_loading {
            debug!(key, "save suppressed during load");
            return;
        }
        match self.try_save(key, items) {
            Ok(()) => debug!(key, count = items.len(), "collection saved"),
            Err(e) => warn!(key, error = %e, "failed to save collection"),
        }
    }

    fn try_save<T: Serialize>(&mut self, key: &str, items: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(items)?;
        self.store.put_document(key, &json)
    }
}
