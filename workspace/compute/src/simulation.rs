//! Synthetic weather for demo mode and for the history endpoint, which has no real
//! upstream source.

use std::f64::consts::PI;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::{
    CurrentWeather, DEMO_COUNTRY, FORECAST_DATETIME_FORMAT, ForecastPoint, ForecastReport,
    ForecastStatistics, HISTORICAL_DATE_FORMAT, HistoricalRecord,
};
use rand::Rng;

use crate::round_to;

/// Number of days covered by the history endpoint.
pub const HISTORY_DAYS: i64 = 30;

/// Number of points in a demo forecast.
pub const DEMO_FORECAST_POINTS: usize = 20;

/// Draws from N(mean, std_dev) with the Box-Muller transform.
pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - [0, 1) keeps the logarithm finite
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Thirty daily records ending the day before `today`, oldest first.
///
/// Temperatures follow one sine period over the window around a random base, with
/// gaussian noise; humidity is gaussian around 70 %.
pub fn simulate_history<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<HistoricalRecord> {
    let base = rng.gen_range(15.0..25.0);

    (0..HISTORY_DAYS)
        .map(|k| {
            let date = today - Duration::days(HISTORY_DAYS - k);
            let seasonal = 5.0 * (2.0 * PI * k as f64 / HISTORY_DAYS as f64).sin();

            HistoricalRecord {
                date: date.format(HISTORICAL_DATE_FORMAT).to_string(),
                temperature: base + seasonal + sample_normal(rng, 0.0, 2.0),
                humidity: sample_normal(rng, 70.0, 10.0),
            }
        })
        .collect()
}

/// Current conditions served in demo mode. The country is always the demo sentinel.
pub fn demo_current<R: Rng + ?Sized>(city: &str, now: NaiveDateTime, rng: &mut R) -> CurrentWeather {
    CurrentWeather {
        city: city.to_string(),
        country: DEMO_COUNTRY.to_string(),
        icon: "01d".to_string(),
        description: "soleado".to_string(),
        temperature: round_to(rng.gen_range(15.0..30.0), 1),
        feels_like: round_to(rng.gen_range(14.0..29.0), 1),
        humidity: rng.gen_range(40..90) as f64,
        pressure: rng.gen_range(1000..1030) as f64,
        wind_speed: round_to(rng.gen_range(1.0..10.0), 1),
        timestamp: Some(now.format(FORECAST_DATETIME_FORMAT).to_string()),
    }
}

/// Forecast served in demo mode: one point every two hours starting at `now`, on a
/// gentle sine, with fixed statistics.
pub fn demo_forecast<R: Rng + ?Sized>(city: &str, now: NaiveDateTime, rng: &mut R) -> ForecastReport {
    let forecasts = (0..DEMO_FORECAST_POINTS)
        .map(|step| {
            let hours = (step * 2) as i64;
            let wave = (hours as f64 / 10.0).sin();

            ForecastPoint {
                datetime: (now + Duration::hours(hours)).format(FORECAST_DATETIME_FORMAT).to_string(),
                temperature: round_to(20.0 + 5.0 * wave, 1),
                feels_like: Some(round_to(19.0 + 5.0 * wave, 1)),
                humidity: Some(rng.gen_range(40..90) as f64),
                pressure: Some(rng.gen_range(1000..1030) as f64),
                wind_speed: Some(round_to(rng.gen_range(1.0..10.0), 1)),
                description: Some("parcialmente nublado".to_string()),
                icon: Some("02d".to_string()),
            }
        })
        .collect();

    ForecastReport {
        city: city.to_string(),
        country: DEMO_COUNTRY.to_string(),
        forecasts,
        statistics: ForecastStatistics {
            avg_temperature: 20.5,
            max_temperature: 25.3,
            min_temperature: 15.7,
            avg_humidity: 65.2,
            total_records: DEMO_FORECAST_POINTS,
        },
    }
}
