//! Domain models for the pingwinek dosing core.

mod child;
mod dose;
mod medication;
mod temperature;
mod validation;

pub use child::*;
pub use dose::*;
pub use medication::*;
pub use temperature::*;
pub use validation::*;
