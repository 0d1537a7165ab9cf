//! Weather service: provider selection and series retrieval
//!
//! Forecast and present-day queries go to Meteomatics; anything strictly in
//! the past goes to NASA POWER's historical archive.

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use shared::models::{
    summarize_meteomatics, summarize_nasa_power, WeatherSource, WeatherSummary,
};
use shared::types::{DateRange, GpsCoordinates};

use crate::error::AppResult;
use crate::external::{MeteomaticsClient, NasaPowerClient};

/// Weather service owning both provider clients
#[derive(Clone)]
pub struct WeatherService {
    meteomatics: MeteomaticsClient,
    nasa_power: NasaPowerClient,
}

impl WeatherService {
    /// Create a new WeatherService
    pub fn new(meteomatics: MeteomaticsClient, nasa_power: NasaPowerClient) -> Self {
        Self {
            meteomatics,
            nasa_power,
        }
    }

    /// Fetch an hourly forecast series from Meteomatics.
    pub async fn fetch_forecast(
        &self,
        location: GpsCoordinates,
        range: DateRange,
    ) -> AppResult<Value> {
        self.meteomatics
            .fetch_timeseries(location.latitude, location.longitude, range.start, range.end)
            .await
    }

    /// Fetch a daily historical series from NASA POWER.
    pub async fn fetch_historical(
        &self,
        location: GpsCoordinates,
        range: DateRange,
    ) -> AppResult<Value> {
        self.nasa_power
            .fetch_daily(location.latitude, location.longitude, range.start, range.end)
            .await
    }

    /// Fetch one day's data from whichever provider covers the date, and
    /// condense it into a summary.
    pub async fn query_summary(
        &self,
        location: GpsCoordinates,
        date: NaiveDate,
    ) -> AppResult<WeatherSummary> {
        let range = DateRange::new(date, date);
        match select_source(date, Utc::now().date_naive()) {
            WeatherSource::Meteomatics => {
                let payload = self.fetch_forecast(location, range).await?;
                Ok(summarize_meteomatics(&payload, location))
            }
            WeatherSource::NasaPower => {
                let payload = self.fetch_historical(location, range).await?;
                Ok(summarize_nasa_power(&payload, location))
            }
        }
    }
}

/// Today and future dates are served by the forecast provider; strictly past
/// dates by the historical archive.
pub fn select_source(query_date: NaiveDate, today: NaiveDate) -> WeatherSource {
    if query_date >= today {
        WeatherSource::Meteomatics
    } else {
        WeatherSource::NasaPower
    }
}
