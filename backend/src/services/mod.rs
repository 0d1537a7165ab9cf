//! Business logic services for the Check-Now backend

pub mod export;
pub mod risk;
pub mod weather;

pub use risk::RiskService;
pub use weather::WeatherService;
