//! Medication catalog.

use crate::models::{Medication, ValidationError};

/// Ordered medication list with an optional selection.
#[derive(Debug, Clone, Default)]
pub struct MedicationCatalog {
    medications: Vec<Medication>,
    selected: Option<usize>,
}

impl MedicationCatalog {
    /// Build a catalog from seed entries, sorted by name.
    pub fn new(medications: Vec<Medication>) -> Self {
        let mut catalog = Self {
            medications,
            selected: None,
        };
        catalog.sort(false);
        catalog
    }

    /// Catalog seeded with [`Medication::default_catalog`].
    pub fn with_defaults() -> Self {
        Self::new(Medication::default_catalog())
    }

    /// Add a medication and re-sort, keeping the current selection.
    pub fn add(&mut self, medication: Medication) -> Result<(), ValidationError> {
        medication.validate()?;
        self.medications.push(medication);
        self.sort(true);
        Ok(())
    }

    /// Sort by name, case-insensitively.
    ///
    /// With `preserve_selection` the selected index follows the same
    /// medication to its new position; otherwise the selection is cleared.
    pub fn sort(&mut self, preserve_selection: bool) {
        let selected_id = self
            .selected()
            .filter(|_| preserve_selection)
            .map(|m| m.id.clone());

        self.medications
            .sort_by_cached_key(|m| m.name.to_lowercase());

        self.selected = selected_id.and_then(|id| self.position_of(&id));
    }

    /// Select by index. Out-of-range or `None` clears the selection.
    pub fn select(&mut self, index: Option<usize>) -> Option<&Medication> {
        self.selected = index.filter(|&i| i < self.medications.len());
        self.selected()
    }

    pub fn selected(&self) -> Option<&Medication> {
        self.selected.and_then(|i| self.medications.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Position of a medication by identity.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.medications.iter().position(|m| m.id == id)
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn len(&self) -> usize {
        self.medications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str) -> Medication {
        Medication::new(name.into(), 1.0, 3, 8).unwrap()
    }

    fn names(catalog: &MedicationCatalog) -> Vec<&str> {
        catalog.medications().iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_seed_is_sorted() {
        let catalog = MedicationCatalog::with_defaults();
        assert_eq!(
            names(&catalog),
            vec![
                "Ibuprofen 100mg/5ml",
                "Ibuprofen 200mg/5ml",
                "Paracetamol 100mg/5ml",
                "Paracetamol 200mg/5ml",
            ]
        );
        assert!(catalog.selected().is_none());
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let catalog = MedicationCatalog::new(vec![med("beta"), med("Alpha"), med("Gamma"), med("alpha2")]);
        assert_eq!(names(&catalog), vec!["Alpha", "alpha2", "beta", "Gamma"]);
    }

    #[test]
    fn test_add_preserves_selection() {
        let mut catalog = MedicationCatalog::new(vec![med("Ibuprofen"), med("Paracetamol")]);
        let selected_id = catalog.select(Some(1)).unwrap().id.clone();

        catalog.add(med("Amoxicillin")).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.selected_index(), Some(2));
        assert_eq!(catalog.selected().unwrap().id, selected_id);
    }

    #[test]
    fn test_sort_without_preserving_clears_selection() {
        let mut catalog = MedicationCatalog::new(vec![med("B"), med("A")]);
        catalog.select(Some(0));
        catalog.sort(false);
        assert!(catalog.selected().is_none());
    }

    #[test]
    fn test_invalid_add_leaves_catalog_untouched() {
        let mut catalog = MedicationCatalog::with_defaults();
        let mut bad = med("Broken");
        bad.dose_per_kg = 0.0;

        assert_eq!(catalog.add(bad), Err(ValidationError::InvalidDosePerKg));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut catalog = MedicationCatalog::with_defaults();
        assert!(catalog.select(Some(0)).is_some());
        assert!(catalog.select(Some(4)).is_none());
        assert!(catalog.selected_index().is_none());
        assert!(catalog.select(None).is_none());
    }
}
