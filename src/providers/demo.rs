use async_trait::async_trait;
use chrono::Local;
use common::{CurrentWeather, ForecastReport};
use compute::simulation::{demo_current, demo_forecast};
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use super::{ProviderError, WeatherProvider};

/// Synthetic data for running without an OpenWeatherMap key. Replies carry the
/// `Demo` country so the dashboard can tell.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

#[async_trait]
impl WeatherProvider for DemoProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        debug!(city, "Serving demo current weather");
        let mut rng = StdRng::from_entropy();
        Ok(demo_current(city, Local::now().naive_local(), &mut rng))
    }

    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError> {
        debug!(city, "Serving demo forecast");
        let mut rng = StdRng::from_entropy();
        Ok(demo_forecast(city, Local::now().naive_local(), &mut rng))
    }

    fn is_demo(&self) -> bool {
        true
    }
}
