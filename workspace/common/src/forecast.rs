use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Format of `ForecastPoint::datetime` as sent by the server.
pub const FORECAST_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One forecast step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastPoint {
    /// `YYYY-MM-DD HH:MM:SS`
    pub datetime: String,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ForecastPoint {
    /// Creates a point carrying only the fields the dashboard charts.
    pub fn new(datetime: impl Into<String>, temperature: f64) -> Self {
        Self {
            datetime: datetime.into(),
            temperature,
            feels_like: None,
            humidity: None,
            pressure: None,
            wind_speed: None,
            description: None,
            icon: None,
        }
    }

    /// Parses `datetime`, also accepting RFC 3339.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.datetime, FORECAST_DATETIME_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.datetime)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
    }
}

/// Aggregates over a forecast, rounded by the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastStatistics {
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub avg_humidity: f64,
    #[serde(default)]
    pub total_records: usize,
}

/// Payload of `/api/weather/forecast/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    /// Chronological, as produced by the upstream provider
    pub forecasts: Vec<ForecastPoint>,
    pub statistics: ForecastStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_timestamp_formats() {
        let point = ForecastPoint::new("2024-10-21 14:00:00", 18.0);
        assert_eq!(point.timestamp().unwrap().hour(), 14);

        let point = ForecastPoint::new("2024-10-21T09:30:00+02:00", 18.0);
        assert_eq!(point.timestamp().unwrap().hour(), 9);

        let point = ForecastPoint::new("mañana", 18.0);
        assert!(point.timestamp().is_none());
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let json = serde_json::to_value(ForecastPoint::new("2024-10-21 14:00:00", 18.5)).unwrap();
        assert_eq!(json, serde_json::json!({"datetime": "2024-10-21 14:00:00", "temperature": 18.5}));
    }
}
