use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{CurrentWeather, ForecastReport, HistoricalReport};
use tracing::{debug, instrument};

use crate::providers::ProviderError;
use crate::schemas::AppState;

/// Current conditions for a city
#[utoipa::path(
    get,
    path = "/api/weather/current/{city}",
    tag = "weather",
    params(
        ("city" = String, Path, description = "City name, e.g. Madrid"),
    ),
    responses(
        (status = 200, description = "Current weather", body = CurrentWeather),
        (status = 400, description = "Rejected by the weather provider", body = common::ErrorReply),
        (status = 500, description = "Internal server error", body = common::ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn get_current_weather(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CurrentWeather>, ProviderError> {
    let current = state.provider.current(&city).await?;
    debug!(country = %current.country, "Current weather ready");
    Ok(Json(current))
}

/// Five day forecast for a city, with aggregate statistics
#[utoipa::path(
    get,
    path = "/api/weather/forecast/{city}",
    tag = "weather",
    params(
        ("city" = String, Path, description = "City name, e.g. Madrid"),
    ),
    responses(
        (status = 200, description = "Forecast and statistics", body = ForecastReport),
        (status = 400, description = "Rejected by the weather provider", body = common::ErrorReply),
        (status = 500, description = "Internal server error", body = common::ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ForecastReport>, ProviderError> {
    let report = state.provider.forecast(&city).await?;
    debug!(points = report.forecasts.len(), "Forecast ready");
    Ok(Json(report))
}

/// Simulated daily history of the last 30 days for a city
#[utoipa::path(
    get,
    path = "/api/weather/historical/{city}",
    tag = "weather",
    params(
        ("city" = String, Path, description = "City name, e.g. Madrid"),
    ),
    responses(
        (status = 200, description = "Daily records and statistics", body = HistoricalReport),
        (status = 500, description = "Internal server error", body = common::ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn get_historical(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HistoricalReport>, ProviderError> {
    let report = state.provider.historical(&city).await?;
    debug!(days = report.historical_data.len(), "History ready");
    Ok(Json(report))
}
