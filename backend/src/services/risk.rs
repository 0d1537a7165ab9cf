//! Risk service: series retrieval plus the pure scoring core

use chrono::NaiveDate;
use shared::models::RiskScore;
use shared::risk::compute_risk;
use shared::types::{DateRange, GpsCoordinates};

use crate::error::AppResult;
use crate::services::weather::WeatherService;

/// Risk assessment service
#[derive(Clone)]
pub struct RiskService {
    weather: WeatherService,
}

impl RiskService {
    /// Create a new RiskService
    pub fn new(weather: WeatherService) -> Self {
        Self { weather }
    }

    /// Fetch the forecast series for a date and derive its risk
    /// distribution.
    pub async fn assess(&self, location: GpsCoordinates, date: NaiveDate) -> AppResult<RiskScore> {
        let payload = self
            .weather
            .fetch_forecast(location, DateRange::new(date, date))
            .await?;
        let score = compute_risk(&payload)?;
        Ok(score)
    }
}
