use std::sync::Arc;

use common::{
    CurrentWeather, ErrorReply, ForecastPoint, ForecastReport, ForecastStatistics,
    HistoricalRecord, HistoricalReport, HistoricalStatistics, Trend,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::providers::WeatherProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Source of current conditions and forecasts
    pub provider: Arc<dyn WeatherProvider>,
    /// Serving synthetic data
    pub demo_mode: bool,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let demo_mode = provider.is_demo();
        Self { provider, demo_mode }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// True when no OpenWeatherMap key is configured
    pub demo_mode: bool,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::weather::get_current_weather,
        crate::handlers::weather::get_forecast,
        crate::handlers::weather::get_historical,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorReply,
            CurrentWeather,
            ForecastPoint,
            ForecastStatistics,
            ForecastReport,
            HistoricalRecord,
            HistoricalStatistics,
            HistoricalReport,
            Trend,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "weather", description = "Current conditions, forecast and history per city"),
    ),
    info(
        title = "Weather Dashboard API",
        description = "Current weather, 5 day forecast and 30 day history for the weather dashboard",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
