//! Check-Now - Backend Server
//!
//! A service for querying point-location weather conditions from external
//! providers and deriving normalized climate risk scores.

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{GeocodingClient, MeteomaticsClient, NasaPowerClient};
use services::{RiskService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherService,
    pub risk: RiskService,
    pub geocoder: GeocodingClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "check_now_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Check-Now Server");
    tracing::info!("Environment: {}", config.environment);

    // Create application state
    let state = build_state(config.clone());

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Construct provider clients and services from explicit configuration
fn build_state(config: Config) -> AppState {
    let meteomatics = MeteomaticsClient::new(
        config.meteomatics.base_url.clone(),
        config.meteomatics.username.clone(),
        config.meteomatics.password.clone(),
    );
    let nasa_power = NasaPowerClient::new(
        config.nasa_power.base_url.clone(),
        config.nasa_power.community.clone(),
    );
    let geocoder = GeocodingClient::new(
        config.geocoding.base_url.clone(),
        config.geocoding.user_agent.clone(),
    );

    let weather = WeatherService::new(meteomatics, nasa_power);
    let risk = RiskService::new(weather.clone());

    AppState {
        config: Arc::new(config),
        weather,
        risk,
        geocoder,
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        // Unified query endpoint kept at the root for frontend parity
        .route("/query_weather", post(handlers::query_weather))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Check-Now API v1.0"
}
