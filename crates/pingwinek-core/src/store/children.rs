//! Child profile store.

use chrono::NaiveDate;

use crate::models::{ChildProfile, ValidationError};

/// Child profiles plus the active selection.
///
/// The active child is tracked by id so it survives removals that shift
/// indices.
#[derive(Debug, Clone, Default)]
pub struct ChildProfileStore {
    children: Vec<ChildProfile>,
    active_id: Option<String>,
}

impl ChildProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all profiles (bulk load). Clears the active selection.
    pub fn replace_all(&mut self, children: Vec<ChildProfile>) {
        self.children = children;
        self.active_id = None;
    }

    pub fn add(&mut self, child: ChildProfile) {
        self.children.push(child);
    }

    /// Edit the profile at `index` in place.
    pub fn edit(
        &mut self,
        index: usize,
        name: String,
        birth_date: NaiveDate,
        weight_kg: f64,
    ) -> Result<&ChildProfile, ValidationError> {
        let child = self
            .children
            .get_mut(index)
            .ok_or(ValidationError::ChildIndexOutOfRange(index))?;
        child.update(name, birth_date, weight_kg)?;
        Ok(child)
    }

    /// Remove a profile by id. Clears the active selection if it pointed there.
    pub fn remove(&mut self, id: &str) -> Option<ChildProfile> {
        let index = self.children.iter().position(|c| c.id == id)?;
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
        }
        Some(self.children.remove(index))
    }

    /// Select the active child by index. Out-of-range or `None` clears it.
    pub fn select_active(&mut self, index: Option<usize>) -> Option<&ChildProfile> {
        self.active_id = index
            .and_then(|i| self.children.get(i))
            .map(|c| c.id.clone());
        self.active()
    }

    pub fn active(&self) -> Option<&ChildProfile> {
        let id = self.active_id.as_deref()?;
        self.get(id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    pub fn get(&self, id: &str) -> Option<&ChildProfile> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn children(&self) -> &[ChildProfile] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
