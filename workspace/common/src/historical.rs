use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Format of `HistoricalRecord::date`.
pub const HISTORICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HistoricalRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl HistoricalRecord {
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, HISTORICAL_DATE_FORMAT).ok()
    }
}

/// Direction of the temperature over the lookback window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum Trend {
    #[serde(rename = "Ascendente")]
    Rising,
    #[serde(rename = "Descendente")]
    Falling,
    #[serde(rename = "Estable")]
    Stable,
}

impl Trend {
    /// Slopes within ±0.1 °C/day count as stable.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.1 {
            Trend::Rising
        } else if slope < -0.1 {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HistoricalStatistics {
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub avg_humidity: f64,
    pub temperature_std: f64,
    pub trend: Trend,
    pub trend_slope: f64,
}

/// Payload of `/api/weather/historical/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HistoricalReport {
    pub city: String,
    /// Oldest day first
    pub historical_data: Vec<HistoricalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<HistoricalStatistics>,
}
