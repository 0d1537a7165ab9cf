//! Configuration management for the Check-Now backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CHECKNOW_ prefix
//!
//! Provider credentials are loaded here and handed to the clients at
//! construction time; nothing reads the process environment after startup.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Meteomatics forecast provider configuration
    pub meteomatics: MeteomaticsConfig,

    /// NASA POWER historical provider configuration
    pub nasa_power: NasaPowerConfig,

    /// Nominatim geocoding configuration
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MeteomaticsConfig {
    /// Meteomatics API base URL
    pub base_url: String,

    /// HTTP basic auth username
    pub username: String,

    /// HTTP basic auth password
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NasaPowerConfig {
    /// NASA POWER daily point API base URL
    pub base_url: String,

    /// NASA POWER community parameter
    pub community: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// User agent sent with geocoding requests (required by Nominatim)
    pub user_agent: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CHECKNOW_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("meteomatics.base_url", "https://api.meteomatics.com")?
            .set_default(
                "nasa_power.base_url",
                "https://power.larc.nasa.gov/api/temporal/daily/point",
            )?
            .set_default("nasa_power.community", "AG")?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "check_now_app")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CHECKNOW_ prefix)
            .add_source(
                Environment::with_prefix("CHECKNOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}
