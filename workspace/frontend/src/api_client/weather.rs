use async_trait::async_trait;
use common::{ApiReply, CurrentWeather, ForecastReport, HistoricalReport};

use crate::api_client::{self, FetchError};

/// The three weather endpoints, each parameterized by city.
#[async_trait(?Send)]
pub trait WeatherApi {
    async fn current(&self, city: &str) -> Result<ApiReply<CurrentWeather>, FetchError>;

    async fn forecast(&self, city: &str) -> Result<ApiReply<ForecastReport>, FetchError>;

    async fn historical(&self, city: &str) -> Result<ApiReply<HistoricalReport>, FetchError>;
}

/// [`WeatherApi`] over HTTP with the browser's fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpWeatherApi {
    base_url: String,
}

impl HttpWeatherApi {
    /// `base_url` is the common prefix of the endpoints, e.g. `/api/weather`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, resource: &str, city: &str) -> String {
        let city = String::from(js_sys::encode_uri_component(city));
        format!("{}/{}/{}", self.base_url, resource, city)
    }
}

#[async_trait(?Send)]
impl WeatherApi for HttpWeatherApi {
    async fn current(&self, city: &str) -> Result<ApiReply<CurrentWeather>, FetchError> {
        log::trace!("Fetching current weather for {}", city);
        api_client::get_reply(&self.endpoint("current", city)).await
    }

    async fn forecast(&self, city: &str) -> Result<ApiReply<ForecastReport>, FetchError> {
        log::trace!("Fetching forecast for {}", city);
        api_client::get_reply(&self.endpoint("forecast", city)).await
    }

    async fn historical(&self, city: &str) -> Result<ApiReply<HistoricalReport>, FetchError> {
        log::trace!("Fetching historical data for {}", city);
        api_client::get_reply(&self.endpoint("historical", city)).await
    }
}
