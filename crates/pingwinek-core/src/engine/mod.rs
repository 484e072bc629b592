//! Dose engine.
//!
//! Pure computation: medication + effective weight (+ temperature) → a
//! [`DoseCalculation`] and its display string. Nothing here touches storage.

mod units;

pub use units::*;

use chrono::{DateTime, Utc};

use crate::models::{DoseCalculation, Medication, ValidationError, TEMPERATURE_UNIT};

/// Unit the computed dose is expressed in.
pub const DOSE_VOLUME_UNIT: &str = "ml";

/// Result of a single calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseResult {
    /// The record to append to history
    pub calculation: DoseCalculation,
    /// Headline text, e.g. "Paracetamol 100mg/5ml 7.50 ml"
    pub display: String,
}

/// Stateless dose calculator.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoseEngine;

impl DoseEngine {
    pub fn new() -> Self {
        Self
    }

    /// Calculate a dose stamped with the current time.
    pub fn calculate(
        &self,
        medication: &Medication,
        weight: &EffectiveWeight,
        temperature: Option<f64>,
        child_id: Option<&str>,
    ) -> Result<DoseResult, ValidationError> {
        self.calculate_at(medication, weight, temperature, child_id, Utc::now())
    }

    /// Calculate a dose with an explicit timestamp.
    ///
    /// A weight large enough to overflow the dose is rejected as invalid.
    pub fn calculate_at(
        &self,
        medication: &Medication,
        weight: &EffectiveWeight,
        temperature: Option<f64>,
        child_id: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<DoseResult, ValidationError> {
        let dose = weight.kg * medication.dose_per_kg;
        if !dose.is_finite() {
            return Err(ValidationError::InvalidWeight);
        }
        let calculated_dose = format_dose(dose);

        let calculation = DoseCalculation {
            id: uuid::Uuid::new_v4().to_string(),
            medication_name: medication.name.clone(),
            weight: weight.recorded,
            weight_unit: weight.recorded_unit.as_str().to_string(),
            calculated_dose: calculated_dose.clone(),
            times_per_day: medication.times_per_day,
            hours_interval: medication.hours_interval,
            timestamp,
            temperature,
            temp_unit: temperature.map(|_| TEMPERATURE_UNIT.to_string()),
            child_id: child_id.map(str::to_string),
        };

        Ok(DoseResult {
            display: format!("{} {}", medication.name, calculated_dose),
            calculation,
        })
    }
}

/// Format a dose volume with two decimals.
pub fn format_dose(dose: f64) -> String {
    format!("{:.2} {}", dose, DOSE_VOLUME_UNIT)
}

/// Parse the optional temperature field; blank or unparsable means "not supplied".
pub fn parse_temperature(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paracetamol() -> Medication {
        Medication::new("Paracetamol".into(), 0.375, 4, 6).unwrap()
    }

    #[test]
    fn test_paracetamol_scenario() {
        let engine = DoseEngine::new();
        let weight = EffectiveWeight::from_input("20", WeightUnit::Kg).unwrap();

        let result = engine.calculate(&paracetamol(), &weight, None, None).unwrap();

        assert_eq!(result.calculation.calculated_dose, "7.50 ml");
        assert_eq!(result.display, "Paracetamol 7.50 ml");
        assert_eq!(result.calculation.times_per_day, 4);
        assert_eq!(result.calculation.hours_interval, 6);
        assert_eq!(result.calculation.weight_unit, "kg");
        assert!(result.calculation.temperature.is_none());
        assert!(result.calculation.temp_unit.is_none());
    }

    #[test]
    fn test_pound_weight_recorded_as_entered() {
        let engine = DoseEngine::new();
        let weight = EffectiveWeight::from_input("44", WeightUnit::Lb).unwrap();

        let result = engine.calculate(&paracetamol(), &weight, None, None).unwrap();

        // 44 lb = 19.958 kg → 7.484 ml
        assert_eq!(result.calculation.calculated_dose, "7.48 ml");
        assert_eq!(result.calculation.weight, 44.0);
        assert_eq!(result.calculation.weight_unit, "lb");
    }

    #[test]
    fn test_temperature_and_child_attached() {
        let engine = DoseEngine::new();
        let weight = EffectiveWeight::from_input("12", WeightUnit::Kg).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

        let result =
            engine.calculate_at(&paracetamol(), &weight, Some(38.6), Some("child-1"), timestamp)
                .unwrap();

        assert_eq!(result.calculation.temperature, Some(38.6));
        assert_eq!(result.calculation.temp_unit.as_deref(), Some("°C"));
        assert_eq!(result.calculation.child_id.as_deref(), Some("child-1"));
        assert_eq!(result.calculation.timestamp, timestamp);
    }

    #[test]
    fn test_overflowing_dose_rejected() {
        let engine = DoseEngine::new();
        let ibuprofen = Medication::new("Ibuprofen".into(), 10.0, 3, 8).unwrap();
        let weight = EffectiveWeight::from_input("1e308", WeightUnit::Kg).unwrap();

        assert_eq!(
            engine.calculate(&ibuprofen, &weight, None, None),
            Err(ValidationError::InvalidWeight)
        );
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature(" 38.5 "), Some(38.5));
        assert_eq!(parse_temperature(""), None);
        assert_eq!(parse_temperature("hot"), None);
        assert_eq!(parse_temperature("NaN"), None);
    }
}
