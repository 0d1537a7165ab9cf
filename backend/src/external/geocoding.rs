//! Nominatim geocoding client
//!
//! Resolves free-text locations to coordinates. Nominatim requires a
//! descriptive User-Agent, which is supplied from configuration.

use reqwest::Client;
use serde::Deserialize;
use shared::types::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Nominatim geocoding client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// One Nominatim search result (coordinates arrive as strings)
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl GeocodingClient {
    /// Create a new GeocodingClient
    pub fn new(base_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            user_agent,
        }
    }

    /// Resolve a free-text location to coordinates. Returns `None` when the
    /// location is unknown to the geocoder.
    pub async fn geocode(&self, query: &str) -> AppResult<Option<GpsCoordinates>> {
        let url = format!("{}/search", self.base_url);

        tracing::info!("Geocoding location: {}", query);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::GeocodingError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::GeocodingError(format!(
                "status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| AppError::GeocodingError(format!("invalid response: {}", e)))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|e| AppError::GeocodingError(format!("invalid latitude: {}", e)))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|e| AppError::GeocodingError(format!("invalid longitude: {}", e)))?;

        Ok(Some(GpsCoordinates::new(latitude, longitude)))
    }
}
