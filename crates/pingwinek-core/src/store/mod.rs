//! In-memory collections owned by a dosing session.

mod catalog;
mod children;
mod history;
mod temperature;

pub use catalog::*;
pub use children::*;
pub use history::*;
pub use temperature::*;
