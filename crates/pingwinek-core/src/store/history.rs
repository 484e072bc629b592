//! Dose calculation history.

use crate::models::DoseCalculation;

/// Calculation log, most recent first.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<DoseCalculation>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries (bulk load). Stored order is kept as-is.
    pub fn replace_all(&mut self, entries: Vec<DoseCalculation>) {
        self.entries = entries;
    }

    /// Insert a calculation at the front.
    pub fn record(&mut self, calculation: DoseCalculation) {
        self.entries.insert(0, calculation);
    }

    /// Entries for a child, or the whole history when no child is given.
    pub fn filter_by_child(&self, child_id: Option<&str>) -> Vec<&DoseCalculation> {
        match child_id {
            Some(id) => self.entries.iter().filter(|c| c.is_for_child(id)).collect(),
            None => self.entries.iter().collect(),
        }
    }

    /// Remove a child's entries, or everything when no child is given.
    /// Returns the number of removed entries.
    pub fn clear(&mut self, child_id: Option<&str>) -> usize {
        let before = self.entries.len();
        match child_id {
            Some(id) => self.entries.retain(|c| !c.is_for_child(id)),
            None => self.entries.clear(),
        }
        before - self.entries.len()
    }

    pub fn latest(&self) -> Option<&DoseCalculation> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[DoseCalculation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
