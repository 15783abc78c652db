use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::ServerConfig;
use crate::providers::{demo::DemoProvider, openweather::OpenWeatherMap, WeatherProvider};
use crate::router::create_router;
use crate::schemas::AppState;

/// Initialize tracing for tests with output to STDERR.
///
/// The level comes from `RUST_LOG` and defaults to WARN. The returned guard
/// uninstalls the subscriber when dropped.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Router over `provider` without static file serving.
pub fn setup_app_with(provider: Arc<dyn WeatherProvider>) -> Router {
    create_router(AppState::new(provider), &ServerConfig::default())
}

/// Router in demo mode.
pub fn setup_test_app() -> Router {
    setup_app_with(Arc::new(DemoProvider))
}

/// Test server whose OpenWeatherMap client talks to `base_url`.
pub fn setup_openweather_server(base_url: &str) -> TestServer {
    let provider = OpenWeatherMap::new(base_url, "test-key", Duration::from_secs(5))
        .expect("Failed to build OpenWeatherMap client");
    TestServer::new(setup_app_with(Arc::new(provider))).expect("Failed to start test server")
}
