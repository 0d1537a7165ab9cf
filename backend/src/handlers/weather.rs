//! HTTP handlers for weather data endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{WeatherQuery, WeatherSummary};
use shared::risk::normalize;
use shared::types::{DateRange, GpsCoordinates};
use shared::validation::{
    build_location_query, parse_date, parse_date_time, validate_date_range, validate_lat_lon,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::export::table_to_csv;
use crate::AppState;

/// Query parameters for a coordinate + date-range request
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub lat: f64,
    pub lon: f64,
    pub start: String,
    pub end: String,
    pub format: Option<String>, // "json" or "csv"
}

/// Query parameters for a geocoded country request
#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub country: String,
    pub start: String,
    pub end: String,
}

/// Weather data response envelope
#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub status: String,
    pub data: Value,
}

/// Geocoded weather data response envelope
#[derive(Debug, Serialize)]
pub struct CountryWeatherResponse {
    pub status: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub data: Value,
}

/// Unified query response envelope
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub status: String,
    #[serde(flatten)]
    pub summary: WeatherSummary,
}

fn validated_range(query_start: &str, query_end: &str) -> AppResult<DateRange> {
    let start = parse_date(query_start).map_err(|msg| AppError::Validation {
        field: "start".to_string(),
        message: msg.to_string(),
    })?;
    let end = parse_date(query_end).map_err(|msg| AppError::Validation {
        field: "end".to_string(),
        message: msg.to_string(),
    })?;
    validate_date_range(start, end).map_err(|msg| AppError::Validation {
        field: "start".to_string(),
        message: msg.to_string(),
    })?;
    Ok(DateRange::new(start, end))
}

/// Fetch a forecast series for explicit coordinates; `format=csv` exports
/// the normalized table instead of the JSON envelope.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    validate_lat_lon(query.lat, query.lon).map_err(|msg| AppError::Validation {
        field: "lat/lon".to_string(),
        message: msg.to_string(),
    })?;
    let range = validated_range(&query.start, &query.end)?;

    let location = GpsCoordinates::new(query.lat, query.lon);
    let data = state.weather.fetch_forecast(location, range).await?;

    if query.format.as_deref() == Some("csv") {
        let table = normalize(&data)?;
        let csv = table_to_csv(&table)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"weather_timeseries.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(WeatherResponse {
            status: "success".to_string(),
            data,
        })
        .into_response())
    }
}

/// Fetch a historical series from NASA POWER for explicit coordinates.
pub async fn get_nasa(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<WeatherResponse>> {
    validate_lat_lon(query.lat, query.lon).map_err(|msg| AppError::Validation {
        field: "lat/lon".to_string(),
        message: msg.to_string(),
    })?;
    let range = validated_range(&query.start, &query.end)?;

    let location = GpsCoordinates::new(query.lat, query.lon);
    let data = state.weather.fetch_historical(location, range).await?;

    Ok(Json(WeatherResponse {
        status: "success".to_string(),
        data,
    }))
}

/// Geocode a country and fetch its forecast series.
pub async fn query_by_country(
    State(state): State<AppState>,
    Query(query): Query<CountryQuery>,
) -> AppResult<Json<CountryWeatherResponse>> {
    let range = validated_range(&query.start, &query.end)?;

    let location = state
        .geocoder
        .geocode(&query.country)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location '{}'", query.country)))?;

    let data = state.weather.fetch_forecast(location, range).await?;

    Ok(Json(CountryWeatherResponse {
        status: "success".to_string(),
        country: query.country,
        lat: location.latitude,
        lon: location.longitude,
        data,
    }))
}

/// Unified query endpoint: resolves coordinates (explicit or geocoded),
/// picks the provider that covers the date and returns a condensed summary.
pub async fn query_weather(
    State(state): State<AppState>,
    Json(query): Json<WeatherQuery>,
) -> AppResult<Json<SummaryResponse>> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let date_time = parse_date_time(&query.date_time).map_err(|msg| AppError::Validation {
        field: "dateTime".to_string(),
        message: msg.to_string(),
    })?;

    let location = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => GpsCoordinates::new(lat, lon),
        _ => {
            let location_query = build_location_query(
                query.country.as_deref(),
                query.city.as_deref(),
                query.locality.as_deref(),
            )
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

            state
                .geocoder
                .geocode(&location_query)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Location '{}'", location_query)))?
        }
    };

    let summary = state
        .weather
        .query_summary(location, date_time.date())
        .await?;

    Ok(Json(SummaryResponse {
        status: "success".to_string(),
        summary,
    }))
}
