use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, ServerConfig};
use crate::router::create_router;

/// Command line overrides for `serve`.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub config_path: String,
    pub bind_address: Option<String>,
    pub static_dir: Option<String>,
}

pub async fn serve(options: ServeOptions) -> Result<()> {
    trace!("Entering serve function");
    info!("Weather dashboard server starting up");

    let mut config = ServerConfig::load(&options.config_path)?;
    if let Some(bind_address) = options.bind_address {
        config.bind_address = bind_address;
    }
    if let Some(static_dir) = options.static_dir {
        config.static_dir = Some(static_dir);
    }
    debug!("Bind address: {}", config.bind_address);
    debug!("Static directory: {:?}", config.static_dir);

    trace!("Initializing application state");
    let state = match initialize_app_state(&config) {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };
    if state.demo_mode {
        info!("No OpenWeatherMap API key configured, serving demo data");
    }

    trace!("Creating application router");
    let app = create_router(state, &config);
    debug!("Router created successfully");

    info!("Starting server on {}", config.bind_address);
    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", config.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", config.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Weather API running on http://{}", config.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
