use common::{ForecastPoint, ForecastStatistics, HistoricalRecord, HistoricalStatistics, Trend};
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::round_to;

/// Mean, max and min of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    mean: f64,
    max: f64,
    min: f64,
}

fn summarize(series: &Series) -> Result<Summary> {
    let values = series.f64()?;
    let missing = || ComputeError::NoData(series.name().to_string());

    Ok(Summary {
        mean: values.mean().ok_or_else(missing)?,
        max: values.max().ok_or_else(missing)?,
        min: values.min().ok_or_else(missing)?,
    })
}

/// Aggregates shown under the forecast chart, each rounded to two decimals.
///
/// Points without humidity are left out of the humidity mean only.
#[instrument(skip(points), fields(points = points.len()))]
pub fn summarize_forecast(points: &[ForecastPoint]) -> Result<ForecastStatistics> {
    let temperature = Series::new(
        "temperature".into(),
        points.iter().map(|p| p.temperature).collect::<Vec<f64>>(),
    );
    let humidity = Series::new(
        "humidity".into(),
        points.iter().filter_map(|p| p.humidity).collect::<Vec<f64>>(),
    );

    let temperature = summarize(&temperature)?;
    let humidity = summarize(&humidity)?;
    debug!(?temperature, ?humidity, "Forecast summarized");

    Ok(ForecastStatistics {
        avg_temperature: round_to(temperature.mean, 2),
        max_temperature: round_to(temperature.max, 2),
        min_temperature: round_to(temperature.min, 2),
        avg_humidity: round_to(humidity.mean, 2),
        total_records: points.len(),
    })
}

/// Aggregates over the history window, including the sample standard deviation of
/// the temperature and its linear trend per day.
#[instrument(skip(records), fields(records = records.len()))]
pub fn summarize_history(records: &[HistoricalRecord]) -> Result<HistoricalStatistics> {
    let temperatures: Vec<f64> = records.iter().map(|r| r.temperature).collect();
    let temperature = Series::new("temperature".into(), temperatures.as_slice());
    let humidity = Series::new(
        "humidity".into(),
        records.iter().map(|r| r.humidity).collect::<Vec<f64>>(),
    );

    let summary = summarize(&temperature)?;
    let humidity = summarize(&humidity)?;
    let std = temperature.f64()?.std(1).unwrap_or(0.0);
    let slope = trend_slope(&temperatures);
    debug!(?summary, std, slope, "History summarized");

    Ok(HistoricalStatistics {
        avg_temperature: round_to(summary.mean, 2),
        max_temperature: round_to(summary.max, 2),
        min_temperature: round_to(summary.min, 2),
        avg_humidity: round_to(humidity.mean, 2),
        temperature_std: round_to(std, 2),
        trend: Trend::from_slope(slope),
        trend_slope: round_to(slope, 3),
    })
}

/// Least-squares slope of `values` against their index. Zero for fewer than two values.
pub fn trend_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (covariance, variance) = values.iter().enumerate().fold((0.0, 0.0), |(cov, var), (i, y)| {
        let dx = i as f64 - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });

    covariance / variance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(datetime: &str, temperature: f64, humidity: Option<f64>) -> ForecastPoint {
        ForecastPoint {
            humidity,
            ..ForecastPoint::new(datetime, temperature)
        }
    }

    fn record(day: u32, temperature: f64, humidity: f64) -> HistoricalRecord {
        HistoricalRecord {
            date: format!("2024-10-{:02}", day),
            temperature,
            humidity,
        }
    }

    #[test]
    fn test_summarize_forecast() {
        let points = vec![
            point("2024-10-21 00:00:00", 14.123, Some(80.0)),
            point("2024-10-21 03:00:00", 16.0, Some(70.0)),
            point("2024-10-21 06:00:00", 21.5, None),
        ];

        let stats = summarize_forecast(&points).unwrap();
        assert_eq!(stats.avg_temperature, 17.21);
        assert_eq!(stats.max_temperature, 21.5);
        assert_eq!(stats.min_temperature, 14.12);
        assert_eq!(stats.avg_humidity, 75.0);
        assert_eq!(stats.total_records, 3);
    }

    #[test]
    fn test_summarize_forecast_without_points() {
        let result = summarize_forecast(&[]);
        assert!(matches!(result, Err(ComputeError::NoData(_))));
    }

    #[test]
    fn test_summarize_history() {
        let records: Vec<_> = (1..=5).map(|d| record(d, 10.0 + d as f64, 60.0)).collect();

        let stats = summarize_history(&records).unwrap();
        assert_eq!(stats.avg_temperature, 13.0);
        assert_eq!(stats.max_temperature, 15.0);
        assert_eq!(stats.min_temperature, 11.0);
        assert_eq!(stats.avg_humidity, 60.0);
        assert_eq!(stats.temperature_std, 1.58);
        assert_eq!(stats.trend_slope, 1.0);
        assert_eq!(stats.trend, Trend::Rising);
    }

    #[test]
    fn test_trend_slope() {
        assert_eq!(trend_slope(&[]), 0.0);
        assert_eq!(trend_slope(&[4.0]), 0.0);
        assert_eq!(trend_slope(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(trend_slope(&[6.0, 4.0, 2.0]), -2.0);
    }
}
