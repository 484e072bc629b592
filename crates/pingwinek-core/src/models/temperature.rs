//! Temperature readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A temperature reading for a child, in degrees Celsius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureEntry {
    pub id: String,
    pub child_id: String,
    pub date: DateTime<Utc>,
    pub value_c: f64,
}

impl TemperatureEntry {
    pub fn new(child_id: String, date: DateTime<Utc>, value_c: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            child_id,
            date,
            value_c,
        }
    }
}
