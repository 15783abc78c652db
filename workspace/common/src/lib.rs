//! Transport-layer types shared between the weather API server and the dashboard.
//! The server serializes these and the frontend deserializes the very same shapes,
//! so the JSON contract of `/api/weather/*` lives in one place.

mod current;
mod forecast;
mod historical;

pub use current::CurrentWeather;
pub use forecast::{FORECAST_DATETIME_FORMAT, ForecastPoint, ForecastReport, ForecastStatistics};
pub use historical::{
    HISTORICAL_DATE_FORMAT, HistoricalRecord, HistoricalReport, HistoricalStatistics, Trend,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// City used by the dashboard's startup probe.
pub const DEMO_PROBE_CITY: &str = "Madrid";

/// Country reported by the server for every city while it runs without an
/// OpenWeatherMap credential.
pub const DEMO_COUNTRY: &str = "Demo";

/// Body of every failed `/api/weather/*` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorReply {
    /// Human readable message, shown to the user as is
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// A weather endpoint answers either with its payload or with an [`ErrorReply`].
///
/// The error shape is tried first: any body carrying an `error` field is a failure,
/// whatever else it contains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiReply<T> {
    Failure(ErrorReply),
    Success(T),
}

impl<T> ApiReply<T> {
    /// Converts into a `Result`, failures carrying the backend message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiReply::Success(payload) => Ok(payload),
            ApiReply::Failure(reply) => Err(reply.error),
        }
    }
}

impl<T> From<ErrorReply> for ApiReply<T> {
    fn from(reply: ErrorReply) -> Self {
        ApiReply::Failure(reply)
    }
}
