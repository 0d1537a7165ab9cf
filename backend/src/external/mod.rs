//! External API integrations

pub mod geocoding;
pub mod meteomatics;
pub mod nasa_power;

pub use geocoding::GeocodingClient;
pub use meteomatics::MeteomaticsClient;
pub use nasa_power::NasaPowerClient;
