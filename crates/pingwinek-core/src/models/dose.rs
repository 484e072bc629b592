//! Dose calculation records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Unit attached to recorded temperatures.
pub const TEMPERATURE_UNIT: &str = "°C";

/// A single completed dose calculation.
///
/// Medication fields are copied at calculation time, so later catalog
/// changes never alter past records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseCalculation {
    /// Unique calculation ID
    pub id: String,
    /// Medication name at calculation time
    pub medication_name: String,
    /// Weight as recorded (entered value, or the child's weight in kg)
    pub weight: f64,
    /// Unit of `weight` ("kg" or "lb")
    pub weight_unit: String,
    /// Formatted dose, e.g. "7.50 ml"
    pub calculated_dose: String,
    /// Doses per day at calculation time
    pub times_per_day: u32,
    /// Hours between doses at calculation time
    pub hours_interval: u32,
    /// When the calculation was made (first dose time)
    pub timestamp: DateTime<Utc>,
    /// Temperature reading taken alongside the calculation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Unit of `temperature`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_unit: Option<String>,
    /// Child the calculation was made for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<String>,
}

impl DoseCalculation {
    /// When the next dose is due.
    pub fn next_dose_time(&self) -> DateTime<Utc> {
        self.offset_hours(self.hours_interval)
            .unwrap_or(self.timestamp)
    }

    /// All dose times for the day, starting with the calculation itself.
    pub fn daily_schedule(&self) -> Vec<DateTime<Utc>> {
        let mut schedule = vec![self.timestamp];
        for i in 1..self.times_per_day {
            let Some(hours) = i.checked_mul(self.hours_interval) else {
                continue;
            };
            if let Some(time) = self.offset_hours(hours) {
                schedule.push(time);
            }
        }
        schedule
    }

    /// Whether this calculation belongs to the given child.
    pub fn is_for_child(&self, child_id: &str) -> bool {
        self.child_id.as_deref() == Some(child_id)
    }

    fn offset_hours(&self, hours: u32) -> Option<DateTime<Utc>> {
        Duration::try_hours(i64::from(hours))
            .and_then(|offset| self.timestamp.checked_add_signed(offset))
    }
}
