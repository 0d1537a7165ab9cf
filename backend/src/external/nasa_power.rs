//! NASA POWER API client for historical weather data
//!
//! Queries the daily point endpoint and returns the raw payload after
//! structural checks, so callers can surface provider errors instead of
//! passing malformed data downstream.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Daily parameters requested from NASA POWER.
const DAILY_PARAMETERS: &str = "T2M,PRECTOT,ALLSKY_SFC_SW_DWN";

/// NASA POWER API client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: Client,
    base_url: String,
    community: String,
}

impl NasaPowerClient {
    /// Create a new NasaPowerClient
    pub fn new(base_url: String, community: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            community,
        }
    }

    /// Fetch daily historical data for a point and date range.
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Value> {
        let params = [
            ("start", start.format("%Y%m%d").to_string()),
            ("end", end.format("%Y%m%d").to_string()),
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("parameters", DAILY_PARAMETERS.to_string()),
            ("community", self.community.clone()),
            ("format", "JSON".to_string()),
        ];

        tracing::info!("Querying NASA POWER: {} with {:?}", self.base_url, params);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("NASA POWER request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "NASA POWER error: {} - {}",
                status, body
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("NASA POWER returned invalid JSON: {}", e))
        })?;

        validate_structure(&data)?;

        tracing::info!("NASA POWER data fetched successfully");
        Ok(data)
    }
}

/// Reject payloads that are not the documented daily-point shape.
fn validate_structure(data: &Value) -> AppResult<()> {
    let object = data.as_object().ok_or_else(|| {
        AppError::ExternalService("Unexpected structure received from NASA POWER".to_string())
    })?;

    if let Some(errors) = object.get("errors") {
        return Err(AppError::ExternalService(format!(
            "NASA POWER reported errors: {}",
            errors
        )));
    }

    if !object.contains_key("properties") {
        return Err(AppError::ExternalService(
            "Unexpected structure received from NASA POWER".to_string(),
        ));
    }

    Ok(())
}
