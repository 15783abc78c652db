use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "weatherdash_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Origin of the weather API (e.g., "http://localhost:10000"); empty means same origin
    pub api_base: String,

    /// Path prefix of the weather endpoints
    pub api_path: String,

    /// Host serving the condition icons, without trailing slash
    pub icon_host: String,

    /// City searched when the page loads
    pub default_city: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_path: "/api/weather".to_string(),
            icon_host: "https://openweathermap.org/img/wn".to_string(),
            default_city: common::DEMO_PROBE_CITY.to_string(),
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |key: &str| storage.get_item(&format!("{}{}", STORAGE_PREFIX, key)).ok().flatten();

            if let Some(api_base) = read("api_base") {
                settings.api_base = api_base;
            }
            if let Some(icon_host) = read("icon_host") {
                settings.icon_host = icon_host;
            }
            if let Some(city) = read("default_city") {
                settings.default_city = city;
            }
            if let Some(level) = read("log_level") {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }
        }

        settings
    }

    /// Get the base URL of the weather endpoints
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), self.api_path)
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
