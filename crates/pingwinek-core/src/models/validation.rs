//! User-facing validation errors.

use thiserror::Error;

use super::{MAX_HOURS_INTERVAL, MAX_TIMES_PER_DAY};

/// Input rejected before any state changed.
///
/// The `Display` text is the message handed to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a medication")]
    NoMedicationSelected,

    #[error("Please enter a valid weight")]
    InvalidWeight,

    #[error("Unknown weight unit: {0}")]
    UnknownUnit(String),

    #[error("Please enter a medication name")]
    EmptyMedicationName,

    #[error("Please enter a valid dose per kg")]
    InvalidDosePerKg,

    #[error("Doses per day must be between 1 and {}, got {0}", MAX_TIMES_PER_DAY)]
    InvalidTimesPerDay(u32),

    #[error("Hours between doses must be between 1 and {}, got {0}", MAX_HOURS_INTERVAL)]
    InvalidHoursInterval(u32),

    #[error("Please enter the child's name")]
    EmptyChildName,

    #[error("Please enter the child's weight")]
    InvalidChildWeight,

    #[error("Invalid birth date: {0}")]
    InvalidBirthDate(String),

    #[error("No child profile at position {0}")]
    ChildIndexOutOfRange(usize),

    #[error("Child profile not found: {0}")]
    UnknownChild(String),
}
