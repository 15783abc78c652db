//! Pure transformations from API payloads into what the dashboard displays.

use chrono::{Locale, NaiveDateTime, NaiveTime};
use common::{CurrentWeather, ForecastPoint, ForecastStatistics, HistoricalRecord};

const LABEL_LOCALE: Locale = Locale::es_ES;
const FORECAST_LABEL_FORMAT: &str = "%a, %-d %b, %H";
const HISTORICAL_LABEL_FORMAT: &str = "%-d %b";

/// Forecast chart data: `labels[i]` belongs to `temperatures[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSeries {
    pub labels: Vec<String>,
    pub temperatures: Vec<f64>,
}

/// History chart data, index-aligned with the input records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalSeries {
    pub labels: Vec<String>,
    pub temperatures: Vec<f64>,
    pub humidity: Vec<f64>,
}

/// One summary tile under the forecast chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub value: String,
    pub label: &'static str,
}

/// Display strings of the current-weather card.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherView {
    pub icon_url: String,
    pub icon_alt: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: String,
}

/// Keeps every other point (indices 0, 2, 4, …) so the axis stays readable.
pub fn forecast_series(points: &[ForecastPoint]) -> ForecastSeries {
    let (labels, temperatures) = points
        .iter()
        .step_by(2)
        .map(|point| (forecast_label(point), point.temperature))
        .unzip();

    ForecastSeries { labels, temperatures }
}

/// Maps every record, no subsampling.
pub fn historical_series(records: &[HistoricalRecord]) -> HistoricalSeries {
    let mut series = HistoricalSeries::default();
    for record in records {
        series.labels.push(historical_label(record));
        series.temperatures.push(record.temperature);
        series.humidity.push(record.humidity);
    }
    series
}

/// Short localized label, e.g. `lun, 21 oct, 14`. Falls back to the raw text when
/// the timestamp does not parse.
pub fn forecast_label(point: &ForecastPoint) -> String {
    match point.timestamp() {
        Some(timestamp) => localized(timestamp, FORECAST_LABEL_FORMAT),
        None => {
            log::warn!("Unparseable forecast timestamp: {}", point.datetime);
            point.datetime.clone()
        }
    }
}

/// Day and month, e.g. `21 oct`.
pub fn historical_label(record: &HistoricalRecord) -> String {
    match record.day() {
        Some(day) => localized(day.and_time(NaiveTime::MIN), HISTORICAL_LABEL_FORMAT),
        None => {
            log::warn!("Unparseable historical date: {}", record.date);
            record.date.clone()
        }
    }
}

// Labels carry no zone, so UTC only serves to reach the localized formatter.
fn localized(timestamp: NaiveDateTime, format: &str) -> String {
    timestamp
        .and_utc()
        .format_localized(format, LABEL_LOCALE)
        .to_string()
}

/// The four forecast aggregates as tiles. Values are printed as received; the
/// server already rounded them.
pub fn statistics_tiles(stats: &ForecastStatistics) -> Vec<StatTile> {
    vec![
        StatTile {
            value: celsius(stats.avg_temperature),
            label: "Temp. Promedio",
        },
        StatTile {
            value: celsius(stats.max_temperature),
            label: "Temp. Máxima",
        },
        StatTile {
            value: celsius(stats.min_temperature),
            label: "Temp. Mínima",
        },
        StatTile {
            value: percent(stats.avg_humidity),
            label: "Humedad Promedio",
        },
    ]
}

pub fn current_view(current: &CurrentWeather, icon_host: &str) -> CurrentWeatherView {
    CurrentWeatherView {
        icon_url: icon_url(icon_host, &current.icon),
        icon_alt: current.description.clone(),
        temperature: celsius(current.temperature),
        description: current.description.clone(),
        feels_like: celsius(current.feels_like),
        humidity: percent(current.humidity),
        pressure: format!("{} hPa", current.pressure),
        wind_speed: format!("{} m/s", current.wind_speed),
    }
}

/// `{icon_host}/{code}@2x.png`
pub fn icon_url(icon_host: &str, code: &str) -> String {
    format!("{}/{}@2x.png", icon_host.trim_end_matches('/'), code)
}

fn celsius(value: f64) -> String {
    format!("{}°C", value)
}

fn percent(value: f64) -> String {
    format!("{}%", value)
}
