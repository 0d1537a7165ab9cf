//! Domain models for the Check-Now weather risk platform

mod risk;
mod timeseries;
mod weather;

pub use risk::*;
pub use timeseries::*;
pub use weather::*;
