//! Where weather data comes from: OpenWeatherMap, or synthetic data in demo mode.

pub mod demo;
pub mod openweather;

use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Local;
use common::{CurrentWeather, ErrorReply, ForecastReport, HistoricalReport};
use compute::{simulation::simulate_history, statistics::summarize_history, ComputeError};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with an error; the message is shown to the user as is.
    #[error("{0}")]
    Upstream(String),

    #[error("Weather provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected weather provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Statistics failed: {0}")]
    Compute(#[from] ComputeError),
}

impl ProviderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::Upstream(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Weather request failed");
        }
        (status, Json(ErrorReply::new(self.to_string()))).into_response()
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError>;

    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError>;

    /// No provider has real history, every one serves the simulated series.
    async fn historical(&self, city: &str) -> Result<HistoricalReport, ProviderError> {
        simulated_history(city)
    }

    fn is_demo(&self) -> bool {
        false
    }
}

/// Thirty simulated days ending yesterday, with their statistics.
pub fn simulated_history(city: &str) -> Result<HistoricalReport, ProviderError> {
    let mut rng = StdRng::from_entropy();
    let records = simulate_history(Local::now().date_naive(), &mut rng);
    let statistics = summarize_history(&records)?;

    Ok(HistoricalReport {
        city: city.to_string(),
        historical_data: records,
        statistics: Some(statistics),
    })
}
