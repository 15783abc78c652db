use std::path::Path;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::handlers::{
    health::health_check,
    weather::{get_current_weather, get_forecast, get_historical},
};
use crate::schemas::{ApiDoc, AppState};

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Weather API
        .route("/api/weather/current/:city", get(get_current_weather))
        .route("/api/weather/forecast/:city", get(get_forecast))
        .route("/api/weather/historical/:city", get(get_historical))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Built dashboard, unknown paths fall back to its index page
    if let Some(static_dir) = &config.static_dir {
        let index = Path::new(static_dir).join("index.html");
        tracing::debug!("Serving dashboard from {}", static_dir);
        router = router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(config.request_timeout()))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
