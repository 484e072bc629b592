//! Temperature log.

use crate::models::TemperatureEntry;

/// Temperature readings for all children, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TemperatureLog {
    entries: Vec<TemperatureEntry>,
}

impl TemperatureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries (bulk load).
    pub fn replace_all(&mut self, entries: Vec<TemperatureEntry>) {
        self.entries = entries;
    }

    pub fn record(&mut self, entry: TemperatureEntry) {
        self.entries.push(entry);
    }

    /// A child's readings, oldest first.
    pub fn entries_for_child(&self, child_id: &str) -> Vec<&TemperatureEntry> {
        let mut series: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.child_id == child_id)
            .collect();
        series.sort_by_key(|e| e.date);
        series
    }

    /// Drop every reading for a child. Returns the number removed.
    pub fn remove_for_child(&mut self, child_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.child_id != child_id);
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[TemperatureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
