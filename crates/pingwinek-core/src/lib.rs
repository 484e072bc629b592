//! Pingwinek Core Library
//!
//! Pediatric dose calculation with per-child history and temperature tracking.
//!
//! # Architecture
//!
//! ```text
//!  weight / unit / temperature      medication + child selection
//!              │                               │
//!              └──────────────┬────────────────┘
//!                             ▼
//!                   ┌───────────────────┐
//!                   │    Dose Engine    │  effective weight → dose, schedule
//!                   └─────────┬─────────┘
//!                             │
//!              ┌──────────────┼──────────────┐
//!              ▼                             ▼
//!        History Store                Temperature Log
//!       (most recent first)        (active child only)
//!              │                             │
//!              └──────────────┬──────────────┘
//!                             ▼
//!                  Persistence Gateway → SQLite key/value documents
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Medication, ChildProfile, DoseCalculation, TemperatureEntry)
//! - [`engine`]: Unit conversion and dose computation
//! - [`store`]: In-memory collections (catalog, children, history, temperatures)
//! - [`persistence`]: JSON document persistence with load-time save suppression
//! - [`calculator`]: The session that ties everything together
//! - [`db`]: SQLite key/value storage
//! - [`config`]: Host-supplied configuration

pub mod calculator;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod persistence;
pub mod store;

// Re-export commonly used types
pub use calculator::{DoseCalculator, DoseOutcome, DoseRequest};
pub use config::{CoreConfig, StorageKeys};
pub use db::{Database, DocumentStore, MemoryStore};
pub use engine::{DoseEngine, EffectiveWeight, WeightUnit};
pub use models::{ChildProfile, DoseCalculation, Medication, TemperatureEntry, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PingwinekError {
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ValidationError> for PingwinekError {
    fn from(e: ValidationError) -> Self {
        PingwinekError::Validation(e.to_string())
    }
}

impl From<db::DbError> for PingwinekError {
    fn from(e: db::DbError) -> Self {
        PingwinekError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for PingwinekError {
    fn from(e: serde_json::Error) -> Self {
        PingwinekError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PingwinekError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PingwinekError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a log subscriber, e.g. `"info"` or `"pingwinek_core=debug"`.
/// Calling it again is a no-op.
#[uniffi::export]
pub fn init_logging(filter: String) {
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PingwinekCore>, PingwinekError> {
    let db = Database::open(&path)?;
    Ok(PingwinekCore::new(db, &CoreConfig::default()))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PingwinekCore>, PingwinekError> {
    let db = Database::open_in_memory()?;
    Ok(PingwinekCore::new(db, &CoreConfig::default()))
}

/// Open a session from a JSON [`CoreConfig`].
#[uniffi::export]
pub fn open_with_config(config_json: String) -> Result<Arc<PingwinekCore>, PingwinekError> {
    let config = CoreConfig::from_json_str(&config_json)?;
    let db = match &config.database_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    Ok(PingwinekCore::new(db, &config))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Session handle for the host app.
///
/// The session is single-owner; the mutex only makes the handle shareable
/// across the FFI boundary.
#[derive(uniffi::Object)]
pub struct PingwinekCore {
    session: Mutex<DoseCalculator<Database>>,
}

impl PingwinekCore {
    fn new(db: Database, config: &CoreConfig) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(DoseCalculator::open(db, config)),
        })
    }
}

#[uniffi::export]
impl PingwinekCore {
    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Medications sorted by name.
    pub fn list_medications(&self) -> Result<Vec<FfiMedication>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session.medications().iter().map(|m| m.into()).collect())
    }

    /// Select a medication by list position; `None` or out of range clears it.
    pub fn select_medication(
        &self,
        index: Option<u32>,
    ) -> Result<Option<FfiMedication>, PingwinekError> {
        let mut session = self.session.lock()?;
        let selected = session.select_medication(index.map(|i| i as usize));
        Ok(selected.map(|m| m.into()))
    }

    /// List position of the selected medication, if any.
    pub fn selected_medication_index(&self) -> Result<Option<u32>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session.catalog().selected_index().map(|i| i as u32))
    }

    /// Add a medication for this session.
    pub fn add_medication(
        &self,
        name: String,
        dose_per_kg: String,
        times_per_day: u32,
        hours_interval: u32,
    ) -> Result<FfiMedication, PingwinekError> {
        let mut session = self.session.lock()?;
        let medication =
            session.add_medication(&name, &dose_per_kg, times_per_day, hours_interval)?;
        Ok((&medication).into())
    }

    // =========================================================================
    // Child Operations
    // =========================================================================

    pub fn list_children(&self) -> Result<Vec<FfiChildProfile>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session
            .children()
            .iter()
            .map(|c| FfiChildProfile::from_profile(c, session.is_active_child(&c.id)))
            .collect())
    }

    /// Add a child; `birth_date` is `YYYY-MM-DD`.
    pub fn add_child(
        &self,
        name: String,
        birth_date: String,
        weight_kg: f64,
    ) -> Result<FfiChildProfile, PingwinekError> {
        let birth_date = models::parse_birth_date(&birth_date)?;
        let mut session = self.session.lock()?;
        let child = session.add_child(name, birth_date, weight_kg)?;
        let active = session.is_active_child(&child.id);
        Ok(FfiChildProfile::from_profile(&child, active))
    }

    pub fn edit_child(
        &self,
        index: u32,
        name: String,
        birth_date: String,
        weight_kg: f64,
    ) -> Result<FfiChildProfile, PingwinekError> {
        let birth_date = models::parse_birth_date(&birth_date)?;
        let mut session = self.session.lock()?;
        let child = session.edit_child(index as usize, name, birth_date, weight_kg)?;
        let active = session.is_active_child(&child.id);
        Ok(FfiChildProfile::from_profile(&child, active))
    }

    /// Delete a child and everything recorded for it.
    pub fn delete_child(&self, child_id: String) -> Result<(), PingwinekError> {
        let mut session = self.session.lock()?;
        session.delete_child(&child_id)?;
        Ok(())
    }

    /// Select the active child by list position; `None` clears it.
    pub fn select_child(
        &self,
        index: Option<u32>,
    ) -> Result<Option<FfiChildProfile>, PingwinekError> {
        let mut session = self.session.lock()?;
        let selected = session
            .select_child(index.map(|i| i as usize))
            .map(|c| FfiChildProfile::from_profile(c, true));
        Ok(selected)
    }

    // =========================================================================
    // Calculation Operations
    // =========================================================================

    /// Calculate a dose for the selected medication.
    ///
    /// `weight` and `unit` are ignored while a child is active.
    pub fn calculate_dose(
        &self,
        weight: String,
        unit: String,
        temperature: String,
    ) -> Result<FfiDoseOutcome, PingwinekError> {
        let request = DoseRequest::from_form(weight, unit, temperature);
        let mut session = self.session.lock()?;
        let outcome = session.calculate(&request)?;
        Ok(outcome.into())
    }

    /// Dose headline or validation message from the last attempt.
    pub fn result_message(&self) -> Result<String, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session.result_message().to_string())
    }

    /// Schedule of the last successful calculation.
    pub fn current_schedule(&self) -> Result<Vec<String>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session
            .current_calculation()
            .map(|c| c.daily_schedule().iter().map(to_rfc3339).collect())
            .unwrap_or_default())
    }

    // =========================================================================
    // History Operations
    // =========================================================================

    /// History for the active child, or all history when none is active.
    pub fn history(&self) -> Result<Vec<FfiDoseCalculation>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session.visible_history().into_iter().map(|c| c.into()).collect())
    }

    /// Clear one child's history, or everything when `child_id` is `None`.
    pub fn clear_history(&self, child_id: Option<String>) -> Result<u32, PingwinekError> {
        let mut session = self.session.lock()?;
        let removed = session.clear_history(child_id.as_deref());
        Ok(u32::try_from(removed).unwrap_or(u32::MAX))
    }

    /// Temperature readings for the active child, oldest first.
    pub fn temperature_series(&self) -> Result<Vec<FfiTemperatureEntry>, PingwinekError> {
        let session = self.session.lock()?;
        Ok(session
            .active_temperature_series()
            .into_iter()
            .map(|e| e.into())
            .collect())
    }
}

fn to_rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: String,
    pub name: String,
    pub dose_per_kg: f64,
    pub unit: String,
    pub times_per_day: u32,
    pub hours_interval: u32,
}

impl From<&Medication> for FfiMedication {
    fn from(medication: &Medication) -> Self {
        Self {
            id: medication.id.clone(),
            name: medication.name.clone(),
            dose_per_kg: medication.dose_per_kg,
            unit: medication.unit.clone(),
            times_per_day: medication.times_per_day,
            hours_interval: medication.hours_interval,
        }
    }
}

/// FFI-safe child profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChildProfile {
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub weight_kg: f64,
    pub is_active: bool,
}

impl FfiChildProfile {
    fn from_profile(child: &ChildProfile, is_active: bool) -> Self {
        Self {
            id: child.id.clone(),
            name: child.name.clone(),
            birth_date: child.birth_date.format("%Y-%m-%d").to_string(),
            weight_kg: child.weight_kg,
            is_active,
        }
    }
}

/// FFI-safe dose calculation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseCalculation {
    pub id: String,
    pub medication_name: String,
    pub weight: f64,
    pub weight_unit: String,
    pub calculated_dose: String,
    pub times_per_day: u32,
    pub hours_interval: u32,
    pub timestamp: String,
    pub next_dose_time: String,
    pub temperature: Option<f64>,
    pub temp_unit: Option<String>,
    pub child_id: Option<String>,
}

impl From<&DoseCalculation> for FfiDoseCalculation {
    fn from(calc: &DoseCalculation) -> Self {
        Self {
            id: calc.id.clone(),
            medication_name: calc.medication_name.clone(),
            weight: calc.weight,
            weight_unit: calc.weight_unit.clone(),
            calculated_dose: calc.calculated_dose.clone(),
            times_per_day: calc.times_per_day,
            hours_interval: calc.hours_interval,
            timestamp: to_rfc3339(&calc.timestamp),
            next_dose_time: to_rfc3339(&calc.next_dose_time()),
            temperature: calc.temperature,
            temp_unit: calc.temp_unit.clone(),
            child_id: calc.child_id.clone(),
        }
    }
}

/// FFI-safe calculation result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseOutcome {
    pub calculation: FfiDoseCalculation,
    pub display: String,
    pub schedule: Vec<String>,
}

impl From<DoseOutcome> for FfiDoseOutcome {
    fn from(outcome: DoseOutcome) -> Self {
        Self {
            calculation: (&outcome.calculation).into(),
            display: outcome.display,
            schedule: outcome.schedule.iter().map(to_rfc3339).collect(),
        }
    }
}

/// FFI-safe temperature reading.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTemperatureEntry {
    pub id: String,
    pub child_id: String,
    pub date: String,
    pub value_c: f64,
}

impl From<&TemperatureEntry> for FfiTemperatureEntry {
    fn from(entry: &TemperatureEntry) -> Self {
        Self {
            id: entry.id.clone(),
            child_id: entry.child_id.clone(),
            date: to_rfc3339(&entry.date),
            value_c: entry.value_c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_calculation_flow() {
        let core = open_database_in_memory().unwrap();

        let meds = core.list_medications().unwrap();
        let index = meds
            .iter()
            .position(|m| m.name == "Paracetamol 100mg/5ml")
            .unwrap() as u32;
        core.select_medication(Some(index)).unwrap();

        let outcome = core
            .calculate_dose("20".into(), "kg".into(), "".into())
            .unwrap();
        assert_eq!(outcome.calculation.calculated_dose, "7.50 ml");
        assert_eq!(outcome.schedule.len(), 4);
        assert_eq!(outcome.schedule[0], outcome.calculation.timestamp);
        assert_eq!(core.current_schedule().unwrap(), outcome.schedule);
        assert_eq!(core.history().unwrap().len(), 1);
    }

    #[test]
    fn test_ffi_validation_message() {
        let core = open_database_in_memory().unwrap();

        let err = core
            .calculate_dose("20".into(), "kg".into(), "".into())
            .unwrap_err();
        assert!(matches!(err, PingwinekError::Validation(ref msg) if msg == "Please select a medication"));
        assert_eq!(core.result_message().unwrap(), "Please select a medication");

        // Medication is checked before the unit
        let err = core
            .calculate_dose("20".into(), "stone".into(), "".into())
            .unwrap_err();
        assert!(matches!(err, PingwinekError::Validation(ref msg) if msg == "Please select a medication"));

        core.select_medication(Some(0)).unwrap();
        let err = core
            .calculate_dose("20".into(), "stone".into(), "".into())
            .unwrap_err();
        assert!(matches!(err, PingwinekError::Validation(ref msg) if msg == "Unknown weight unit: stone"));
        assert_eq!(core.result_message().unwrap(), "Unknown weight unit: stone");
        assert!(core.history().unwrap().is_empty());
    }

    #[test]
    fn test_ffi_active_child_ignores_unit() {
        let core = open_database_in_memory().unwrap();
        core.add_child("Ola".into(), "2021-03-14".into(), 12.5).unwrap();
        core.select_child(Some(0)).unwrap();
        core.select_medication(Some(0)).unwrap();

        let outcome = core
            .calculate_dose("".into(), "".into(), "".into())
            .unwrap();
        assert_eq!(outcome.calculation.weight, 12.5);
        assert_eq!(outcome.calculation.weight_unit, "kg");
        assert_eq!(core.result_message().unwrap(), outcome.display);
    }

    #[test]
    fn test_ffi_children() {
        let core = open_database_in_memory().unwrap();

        let child = core
            .add_child("Ola".into(), "2021-03-14".into(), 12.5)
            .unwrap();
        assert!(!child.is_active);
        assert_eq!(child.birth_date, "2021-03-14");

        core.select_child(Some(0)).unwrap();
        let children = core.list_children().unwrap();
        assert!(children[0].is_active);

        assert!(matches!(
            core.add_child("Janek".into(), "yesterday".into(), 18.0),
            Err(PingwinekError::Validation(_))
        ));

        core.delete_child(child.id).unwrap();
        assert!(core.list_children().unwrap().is_empty());
    }

    #[test]
    fn test_open_with_config() {
        let core = open_with_config(r#"{"seed_default_catalog": false}"#.into()).unwrap();
        assert!(core.list_medications().unwrap().is_empty());

        assert!(matches!(
            open_with_config("nope".into()),
            Err(PingwinekError::InvalidInput(_))
        ));
    }
}
