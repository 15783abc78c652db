use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{DEMO_COUNTRY, DEMO_PROBE_CITY};

/// Current conditions for one city.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    /// OpenWeatherMap icon code, e.g. `01d`
    pub icon: String,
    pub description: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Degrees Celsius
    pub feels_like: f64,
    /// Percent
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    /// m/s
    pub wind_speed: f64,
    /// Server local time of the reading, `YYYY-MM-DD HH:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CurrentWeather {
    /// True when this is the server's answer to the startup probe while it has no
    /// real data source.
    pub fn is_demo_sentinel(&self) -> bool {
        self.city == DEMO_PROBE_CITY && self.country == DEMO_COUNTRY
    }
}
