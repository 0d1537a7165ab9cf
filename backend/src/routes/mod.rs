//! Route definitions for the Check-Now backend

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Forecast series for explicit coordinates (JSON or CSV)
        .route("/weather", get(handlers::get_weather))
        // Risk distribution for a location and date
        .route("/risk", get(handlers::get_risk))
        // Geocoded country query
        .route("/query", get(handlers::query_by_country))
        // Historical series from NASA POWER
        .route("/nasa", get(handlers::get_nasa))
}
