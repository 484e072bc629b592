//! Weight unit conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ChildProfile, ValidationError};

/// Kilograms per avoirdupois pound.
pub const KG_PER_LB: f64 = 0.45359237;

/// Supported weight units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }

    /// Convert a value in this unit to kilograms.
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => value * KG_PER_LB,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            other => Err(ValidationError::UnknownUnit(other.to_string())),
        }
    }
}

/// Convert a dosing weight to kilograms, rejecting non-positive values.
pub fn to_kg(value: f64, unit: WeightUnit) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidWeight);
    }
    Ok(unit.to_kg(value))
}

/// The weight a calculation is based on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveWeight {
    /// Canonical weight used for the dose
    pub kg: f64,
    /// Weight as it will be recorded in history
    pub recorded: f64,
    /// Unit of `recorded`
    pub recorded_unit: WeightUnit,
}

impl EffectiveWeight {
    /// Weight taken from a stored child profile.
    pub fn from_child(child: &ChildProfile) -> Result<Self, ValidationError> {
        let kg = to_kg(child.weight_kg, WeightUnit::Kg)?;
        Ok(Self {
            kg,
            recorded: kg,
            recorded_unit: WeightUnit::Kg,
        })
    }

    /// Weight typed into the free-text field.
    pub fn from_input(text: &str, unit: WeightUnit) -> Result<Self, ValidationError> {
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidWeight)?;
        let kg = to_kg(value, unit)?;
        Ok(Self {
            kg,
            recorded: value,
            recorded_unit: unit,
        })
    }

    /// An active child's weight wins over whatever was typed.
    ///
    /// The typed weight and its unit are only parsed when no child is active.
    pub fn resolve(
        active_child: Option<&ChildProfile>,
        text: &str,
        unit_text: &str,
    ) -> Result<Self, ValidationError> {
        match active_child {
            Some(child) => Self::from_child(child),
            None => Self::from_input(text, unit_text.parse()?),
        }
    }
}
