//! Meteomatics API client for forecast and present-day weather series
//!
//! Fetches hourly time series for a point location and flattens the
//! provider's nested response into a flat mapping of parameter name to
//! `{date, value}` entries - the shape the risk normalizer consumes.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shared::models::DataPoint;

use crate::error::{AppError, AppResult};

/// Hourly parameters requested for every series.
const TIMESERIES_PARAMETERS: &str = "t_2m:C,precip_1h:mm,wind_speed_10m:ms,global_rad:wm2";

/// Meteomatics API client
#[derive(Clone)]
pub struct MeteomaticsClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

/// Meteomatics time-series response
#[derive(Debug, Deserialize)]
struct MeteomaticsResponse {
    data: Vec<MeteomaticsParameter>,
}

#[derive(Debug, Deserialize)]
struct MeteomaticsParameter {
    parameter: String,
    coordinates: Vec<MeteomaticsCoordinate>,
}

#[derive(Debug, Deserialize)]
struct MeteomaticsCoordinate {
    dates: Vec<MeteomaticsDate>,
}

#[derive(Debug, Deserialize)]
struct MeteomaticsDate {
    date: String,
    value: Option<f64>,
}

impl MeteomaticsClient {
    /// Create a new MeteomaticsClient
    pub fn new(base_url: String, username: String, password: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            username,
            password,
        }
    }

    /// Fetch an hourly weather series for a point and date range.
    ///
    /// Returns the flat-mapping payload (`parameter -> [{date, value}]`)
    /// ready for the risk normalizer.
    pub async fn fetch_timeseries(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Value> {
        let url = format!(
            "{}/{}T00:00:00Z--{}T00:00:00Z:PT1H/{}/{},{}/json",
            self.base_url, start, end, TIMESERIES_PARAMETERS, latitude, longitude
        );

        tracing::info!("Querying Meteomatics: {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Meteomatics request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Meteomatics error: {} - {}",
                status, body
            )));
        }

        let data: MeteomaticsResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Meteomatics response: {}", e))
        })?;

        Ok(flatten_response(data))
    }
}

/// Flatten the nested parameter/coordinates/dates response into the flat
/// mapping shape. Only the first (and for point queries, only) coordinate's
/// series is kept.
fn flatten_response(data: MeteomaticsResponse) -> Value {
    let mut payload = serde_json::Map::new();

    for parameter in data.data {
        let points: Vec<DataPoint> = parameter
            .coordinates
            .into_iter()
            .next()
            .map(|coordinate| {
                coordinate
                    .dates
                    .into_iter()
                    .map(|d| DataPoint::new(d.date, d.value))
                    .collect()
            })
            .unwrap_or_default();

        payload.insert(
            parameter.parameter,
            serde_json::to_value(points).unwrap_or(Value::Array(Vec::new())),
        );
    }

    Value::Object(payload)
}
