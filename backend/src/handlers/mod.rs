//! HTTP handlers for the Check-Now backend

pub mod health;
pub mod risk;
pub mod weather;

pub use health::health_check;
pub use risk::get_risk;
pub use weather::{get_nasa, get_weather, query_by_country, query_weather};
