//! Dosing session.
//!
//! Owns every collection and is the only place they are mutated. Each
//! mutating operation on a persisted collection ends with an explicit save.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::db::DocumentStore;
use crate::engine::{parse_temperature, DoseEngine, EffectiveWeight, WeightUnit};
use crate::models::{
    ChildProfile, DoseCalculation, Medication, TemperatureEntry, ValidationError,
};
use crate::persistence::PersistenceGateway;
use crate::store::{ChildProfileStore, HistoryStore, MedicationCatalog, TemperatureLog};

/// Raw form input for a dose calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseRequest {
    /// Free-text weight, ignored while a child is active
    pub weight_text: String,
    /// Unit of `weight_text` as picked in the form; parsed with it
    pub unit_text: String,
    /// Free-text temperature in °C; blank means none
    pub temperature_text: String,
}

impl Default for DoseRequest {
    fn default() -> Self {
        Self::new("", WeightUnit::default())
    }
}

impl DoseRequest {
    pub fn new(weight_text: impl Into<String>, unit: WeightUnit) -> Self {
        Self::from_form(weight_text, unit.as_str(), "")
    }

    /// Request built straight from the host's text fields.
    pub fn from_form(
        weight_text: impl Into<String>,
        unit_text: impl Into<String>,
        temperature_text: impl Into<String>,
    ) -> Self {
        Self {
            weight_text: weight_text.into(),
            unit_text: unit_text.into(),
            temperature_text: temperature_text.into(),
        }
    }

    pub fn with_temperature(mut self, temperature_text: impl Into<String>) -> Self {
        self.temperature_text = temperature_text.into();
        self
    }
}

/// A successful calculation as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseOutcome {
    pub calculation: DoseCalculation,
    pub display: String,
    pub schedule: Vec<DateTime<Utc>>,
}

/// A single user's dosing session over a document store.
pub struct DoseCalculator<S> {
    catalog: MedicationCatalog,
    children: ChildProfileStore,
    history: HistoryStore,
    temperatures: TemperatureLog,
    engine: DoseEngine,
    gateway: PersistenceGateway<S>,
    current: Option<DoseCalculation>,
    result_message: String,
}

impl<S: DocumentStore> DoseCalculator<S> {
    /// Open a session and load the persisted collections.
    pub fn open(store: S, config: &CoreConfig) -> Self {
        let catalog = if config.seed_default_catalog {
            MedicationCatalog::with_defaults()
        } else {
            MedicationCatalog::default()
        };

        let mut calculator = Self {
            catalog,
            children: ChildProfileStore::new(),
            history: HistoryStore::new(),
            temperatures: TemperatureLog::new(),
            engine: DoseEngine::new(),
            gateway: PersistenceGateway::new(store, config.storage_keys.clone()),
            current: None,
            result_message: String::new(),
        };
        calculator.load();
        calculator
    }

    /// Reload children, history and temperatures from storage.
    pub fn load(&mut self) {
        self.gateway.begin_load();
        self.children.replace_all(self.gateway.load_children());
        self.history.replace_all(self.gateway.load_history());
        self.temperatures
            .replace_all(self.gateway.load_temperature_log());
        self.gateway.end_load();

        info!(
            children = self.children.len(),
            history = self.history.len(),
            temperatures = self.temperatures.len(),
            "session loaded"
        );
    }

    // =========================================================================
    // Medications
    // =========================================================================

    pub fn medications(&self) -> &[Medication] {
        self.catalog.medications()
    }

    pub fn select_medication(&mut self, index: Option<usize>) -> Option<&Medication> {
        self.catalog.select(index)
    }

    pub fn selected_medication(&self) -> Option<&Medication> {
        self.catalog.selected()
    }

    pub fn catalog(&self) -> &MedicationCatalog {
        &self.catalog
    }

    /// Add a medication from the "new medication" form.
    ///
    /// Catalog additions live for the session only.
    pub fn add_medication(
        &mut self,
        name: &str,
        dose_text: &str,
        times_per_day: u32,
        hours_interval: u32,
    ) -> Result<Medication, ValidationError> {
        let medication = Medication::from_input(name, dose_text, times_per_day, hours_interval)?;
        self.catalog.add(medication.clone())?;
        debug!(name = %medication.name, "medication added");
        Ok(medication)
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn children(&self) -> &[ChildProfile] {
        self.children.children()
    }

    pub fn active_child(&self) -> Option<&ChildProfile> {
        self.children.active()
    }

    pub fn is_active_child(&self, id: &str) -> bool {
        self.children.is_active(id)
    }

    pub fn select_child(&mut self, index: Option<usize>) -> Option<&ChildProfile> {
        self.children.select_active(index)
    }

    pub fn add_child(
        &mut self,
        name: String,
        birth_date: NaiveDate,
        weight_kg: f64,
    ) -> Result<ChildProfile, ValidationError> {
        let child = ChildProfile::new(name, birth_date, weight_kg)?;
        self.children.add(child.clone());
        debug!(child_id = %child.id, "child added");
        self.gateway.save_children(self.children.children());
        Ok(child)
    }

    pub fn edit_child(
        &mut self,
        index: usize,
        name: String,
        birth_date: NaiveDate,
        weight_kg: f64,
    ) -> Result<ChildProfile, ValidationError> {
        let child = self
            .children
            .edit(index, name, birth_date, weight_kg)?
            .clone();
        debug!(child_id = %child.id, "child edited");
        self.gateway.save_children(self.children.children());
        Ok(child)
    }

    /// Delete a child together with its history and temperature readings.
    pub fn delete_child(&mut self, id: &str) -> Result<(), ValidationError> {
        self.children
            .remove(id)
            .ok_or_else(|| ValidationError::UnknownChild(id.to_string()))?;
        let calculations = self.history.clear(Some(id));
        let readings = self.temperatures.remove_for_child(id);
        debug!(child_id = id, calculations, readings, "child deleted");

        self.gateway.save_children(self.children.children());
        self.gateway.save_history(self.history.entries());
        self.gateway.save_temperature_log(self.temperatures.entries());
        Ok(())
    }

    // =========================================================================
    // Calculation
    // =========================================================================

    /// Calculate a dose for the selected medication and record it.
    ///
    /// On failure nothing is recorded and the result message carries the
    /// validation text.
    pub fn calculate(&mut self, request: &DoseRequest) -> Result<DoseOutcome, ValidationError> {
        match self.try_calculate(request) {
            Ok(outcome) => {
                self.result_message = outcome.display.clone();
                Ok(outcome)
            }
            Err(e) => {
                debug!(error = %e, "calculation rejected");
                self.result_message = e.to_string();
                Err(e)
            }
        }
    }

    fn try_calculate(&mut self, request: &DoseRequest) -> Result<DoseOutcome, ValidationError> {
        let medication = self
            .catalog
            .selected()
            .ok_or(ValidationError::NoMedicationSelected)?;
        let active_child = self.children.active();
        let weight =
            EffectiveWeight::resolve(active_child, &request.weight_text, &request.unit_text)?;
        let temperature = parse_temperature(&request.temperature_text);
        let child_id = active_child.map(|c| c.id.clone());

        let result = self
            .engine
            .calculate(medication, &weight, temperature, child_id.as_deref())?;
        let calculation = result.calculation;

        self.history.record(calculation.clone());
        self.gateway.save_history(self.history.entries());

        if let (Some(value_c), Some(child_id)) = (temperature, child_id) {
            self.temperatures
                .record(TemperatureEntry::new(child_id, calculation.timestamp, value_c));
            self.gateway.save_temperature_log(self.temperatures.entries());
        }

        info!(
            medication = %calculation.medication_name,
            dose = %calculation.calculated_dose,
            "dose calculated"
        );

        self.current = Some(calculation.clone());
        Ok(DoseOutcome {
            schedule: calculation.daily_schedule(),
            display: result.display,
            calculation,
        })
    }

    /// The last successful calculation.
    pub fn current_calculation(&self) -> Option<&DoseCalculation> {
        self.current.as_ref()
    }

    /// Dose headline or validation message from the last attempt.
    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    // =========================================================================
    // History & temperatures
    // =========================================================================

    /// History for the active child; everything when no child is active.
    pub fn visible_history(&self) -> Vec<&DoseCalculation> {
        self.history.filter_by_child(self.children.active_id())
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Clear a child's history, or all of it. Returns the number removed.
    pub fn clear_history(&mut self, child_id: Option<&str>) -> usize {
        let removed = self.history.clear(child_id);
        self.gateway.save_history(self.history.entries());
        removed
    }

    /// Temperature series for the active child, oldest first.
    pub fn active_temperature_series(&self) -> Vec<&TemperatureEntry> {
        match self.children.active_id() {
            Some(id) => self.temperatures.entries_for_child(id),
            None => Vec::new(),
        }
    }

    pub fn temperatures(&self) -> &TemperatureLog {
        &self.temperatures
    }

    // =========================================================================
    // Storage
    // =========================================================================

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    pub fn into_store(self) -> S {
        self.gateway.into_store()
    }
}
