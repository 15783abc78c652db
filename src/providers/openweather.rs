use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use common::{CurrentWeather, ForecastPoint, ForecastReport, FORECAST_DATETIME_FORMAT};
use compute::statistics::summarize_forecast;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, instrument, warn};

use super::{ProviderError, WeatherProvider};

/// Client for the OpenWeatherMap 2.5 API, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherMap {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct Failure {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Country {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    sys: Country,
    main: Readings,
    wind: Wind,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct ForecastCity {
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: String,
    main: Readings,
    wind: Wind,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    city: ForecastCity,
    list: Vec<ForecastItem>,
}

fn first_condition(conditions: Vec<Condition>) -> Condition {
    conditions.into_iter().next().unwrap_or_default()
}

impl OpenWeatherMap {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// GETs `{base_url}/{resource}` for `city`. Non-2xx answers become
    /// [`ProviderError::Upstream`] with the provider's own message.
    async fn get<T: DeserializeOwned>(&self, resource: &str, city: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, city, "Querying OpenWeatherMap");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Failure>(&body)
                .map(|failure| failure.message)
                .unwrap_or_else(|_| format!("OpenWeatherMap answered {}", status));
            warn!(%status, %message, "OpenWeatherMap rejected the request");
            return Err(ProviderError::Upstream(message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    #[instrument(skip(self))]
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        let payload: CurrentPayload = self.get("weather", city).await?;
        let condition = first_condition(payload.weather);

        Ok(CurrentWeather {
            city: payload.name,
            country: payload.sys.country,
            icon: condition.icon,
            description: condition.description,
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            wind_speed: payload.wind.speed,
            timestamp: Some(Local::now().format(FORECAST_DATETIME_FORMAT).to_string()),
        })
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError> {
        let payload: ForecastPayload = self.get("forecast", city).await?;
        if payload.list.is_empty() {
            return Err(ProviderError::Upstream(format!(
                "No forecast available for {}",
                payload.city.name
            )));
        }

        let forecasts: Vec<ForecastPoint> = payload
            .list
            .into_iter()
            .map(|item| {
                let condition = first_condition(item.weather);
                ForecastPoint {
                    datetime: item.dt_txt,
                    temperature: item.main.temp,
                    feels_like: Some(item.main.feels_like),
                    humidity: Some(item.main.humidity),
                    pressure: Some(item.main.pressure),
                    wind_speed: Some(item.wind.speed),
                    description: Some(condition.description),
                    icon: Some(condition.icon),
                }
            })
            .collect();
        let statistics = summarize_forecast(&forecasts)?;

        Ok(ForecastReport {
            city: payload.city.name,
            country: payload.city.country,
            forecasts,
            statistics,
        })
    }
}
