//! Medication definitions.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Default label for the per-kg dosing rate.
pub const DEFAULT_DOSE_UNIT: &str = "ml/kg";

/// Upper bound for doses per day on user-added medications.
pub const MAX_TIMES_PER_DAY: u32 = 12;

/// Upper bound for the hour interval on user-added medications.
pub const MAX_HOURS_INTERVAL: u32 = 24;

/// A medication the dose can be calculated for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Unique identifier (UUID)
    pub id: String,
    /// Display name, including strength (e.g., "Ibuprofen 100mg/5ml")
    pub name: String,
    /// Volume per kilogram of body weight
    pub dose_per_kg: f64,
    /// Label for the dosing rate (e.g., "ml/kg")
    pub unit: String,
    /// Number of doses per day
    pub times_per_day: u32,
    /// Hours between consecutive doses
    pub hours_interval: u32,
}

impl Medication {
    /// Create a validated medication with the default unit label.
    pub fn new(
        name: String,
        dose_per_kg: f64,
        times_per_day: u32,
        hours_interval: u32,
    ) -> Result<Self, ValidationError> {
        let medication = Self::unchecked(name.trim(), dose_per_kg, times_per_day, hours_interval);
        medication.validate()?;
        Ok(medication)
    }

    /// Build a medication from the raw "add medication" form fields.
    pub fn from_input(
        name: &str,
        dose_text: &str,
        times_per_day: u32,
        hours_interval: u32,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyMedicationName);
        }
        let dose_per_kg = dose_text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidDosePerKg)?;
        Self::new(name.to_string(), dose_per_kg, times_per_day, hours_interval)
    }

    /// Check the catalog invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyMedicationName);
        }
        if !self.dose_per_kg.is_finite() || self.dose_per_kg <= 0.0 {
            return Err(ValidationError::InvalidDosePerKg);
        }
        if !(1..=MAX_TIMES_PER_DAY).contains(&self.times_per_day) {
            return Err(ValidationError::InvalidTimesPerDay(self.times_per_day));
        }
        if !(1..=MAX_HOURS_INTERVAL).contains(&self.hours_interval) {
            return Err(ValidationError::InvalidHoursInterval(self.hours_interval));
        }
        Ok(())
    }

    /// The built-in medications every session starts with.
    pub fn default_catalog() -> Vec<Medication> {
        vec![
            Self::unchecked("Paracetamol 100mg/5ml", 0.375, 4, 6),
            Self::unchecked("Paracetamol 200mg/5ml", 0.375, 4, 6),
            Self::unchecked("Ibuprofen 200mg/5ml", 10.0, 3, 8),
            Self::unchecked("Ibuprofen 100mg/5ml", 10.0, 3, 8),
        ]
    }

    fn unchecked(name: &str, dose_per_kg: f64, times_per_day: u32, hours_interval: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            dose_per_kg,
            unit: DEFAULT_DOSE_UNIT.to_string(),
            times_per_day,
            hours_interval,
        }
    }
}
