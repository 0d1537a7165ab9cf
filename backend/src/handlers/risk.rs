//! HTTP handlers for risk assessment endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::models::RiskScore;
use shared::types::GpsCoordinates;
use shared::validation::{parse_date, validate_lat_lon};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for risk assessment
#[derive(Debug, Deserialize)]
pub struct RiskQuery {
    pub lat: f64,
    pub lon: f64,
    pub date_query: String,
}

/// Risk assessment response envelope
#[derive(Debug, Serialize)]
pub struct RiskResponse {
    pub status: String,
    pub risk: RiskScore,
}

/// Assess weather risk for a location and date
pub async fn get_risk(
    State(state): State<AppState>,
    Query(query): Query<RiskQuery>,
) -> AppResult<Json<RiskResponse>> {
    validate_lat_lon(query.lat, query.lon).map_err(|msg| AppError::Validation {
        field: "lat/lon".to_string(),
        message: msg.to_string(),
    })?;
    let date = parse_date(&query.date_query).map_err(|msg| AppError::Validation {
        field: "date_query".to_string(),
        message: msg.to_string(),
    })?;

    let location = GpsCoordinates::new(query.lat, query.lon);
    let risk = state.risk.assess(location, date).await?;

    Ok(Json(RiskResponse {
        status: "success".to_string(),
        risk,
    }))
}
