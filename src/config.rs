use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::providers::{demo::DemoProvider, openweather::OpenWeatherMap, WeatherProvider};
use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:10000";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
/// Placeholder key that keeps the server in demo mode.
pub const DEMO_API_KEY: &str = "demo_key";

/// Server configuration: built-in defaults, then the optional config file, then
/// `WEATHERDASH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    #[serde(default)]
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    #[serde(default)]
    pub static_dir: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            static_dir: None,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let mut config: ServerConfig = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("openweather_base_url", defaults.openweather_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("WEATHERDASH"))
            .build()?
            .try_deserialize()?;

        if config.openweather_api_key.is_none() {
            config.openweather_api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        }

        tracing::debug!(
            bind_address = %config.bind_address,
            base_url = %config.openweather_base_url,
            demo = config.demo_mode(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// True when there is no usable OpenWeatherMap key.
    pub fn demo_mode(&self) -> bool {
        match self.openweather_api_key.as_deref().map(str::trim) {
            None | Some("") | Some(DEMO_API_KEY) => true,
            Some(_) => false,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Picks the weather provider for `config` and builds the shared state.
pub fn initialize_app_state(config: &ServerConfig) -> Result<AppState> {
    let provider: Arc<dyn WeatherProvider> = match &config.openweather_api_key {
        Some(key) if !config.demo_mode() => {
            tracing::info!("Using OpenWeatherMap at {}", config.openweather_base_url);
            Arc::new(OpenWeatherMap::new(
                &config.openweather_base_url,
                key.trim(),
                config.request_timeout(),
            )?)
        }
        _ => Arc::new(DemoProvider),
    };

    Ok(AppState::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: Option<&str>) -> ServerConfig {
        ServerConfig {
            openweather_api_key: key.map(str::to_string),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_demo_mode_detection() {
        assert!(with_key(None).demo_mode());
        assert!(with_key(Some("")).demo_mode());
        assert!(with_key(Some("demo_key")).demo_mode());
        assert!(!with_key(Some("0123456789abcdef")).demo_mode());
    }

    #[test]
    fn test_state_follows_demo_mode() {
        let state = initialize_app_state(&with_key(Some("demo_key"))).unwrap();
        assert!(state.demo_mode);

        let state = initialize_app_state(&with_key(Some("0123456789abcdef"))).unwrap();
        assert!(!state.demo_mode);
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:10000");
        assert_eq!(config.openweather_base_url, DEFAULT_OPENWEATHER_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
