//! Chart configuration and the lifecycle of live chart instances.

use plotly::common::{AxisSide, Fill, Line, LineShape, Mode, Title};
use plotly::layout::{Axis, HoverMode};
use plotly::{Layout, Scatter};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::formatter::{ForecastSeries, HistoricalSeries};

pub const TEMPERATURE_LABEL: &str = "Temperatura (°C)";
pub const HUMIDITY_LABEL: &str = "Humedad (%)";

const BLUE: &str = "#3498db";
const BLUE_FILL: &str = "rgba(52, 152, 219, 0.1)";
const RED: &str = "#e74c3c";
const RED_FILL: &str = "rgba(231, 76, 60, 0.1)";

/// Declarative chart configuration: plotly traces plus layout, as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub data: Vec<Value>,
    pub layout: Value,
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Single temperature line over the subsampled forecast labels.
pub fn forecast_chart(series: &ForecastSeries, city: &str, country: &str) -> ChartSpec {
    let temperature = Scatter::new(series.labels.clone(), series.temperatures.clone())
        .mode(Mode::Lines)
        .name(TEMPERATURE_LABEL)
        .line(Line::new().color(BLUE).width(2.0).shape(LineShape::Spline))
        .fill(Fill::ToZeroY)
        .fill_color(BLUE_FILL);

    let title = format!("Pronóstico de 5 días para {}, {}", city, country);
    let layout = Layout::new()
        .title(Title::with_text(&title))
        .hover_mode(HoverMode::XUnified)
        .y_axis(Axis::new().title(Title::with_text(TEMPERATURE_LABEL)));

    ChartSpec {
        data: vec![to_value(&temperature)],
        layout: to_value(&layout),
    }
}

/// Temperature on the left axis and humidity on an independent right axis that
/// draws no grid of its own.
pub fn historical_chart(series: &HistoricalSeries, city: &str) -> ChartSpec {
    let temperature = Scatter::new(series.labels.clone(), series.temperatures.clone())
        .mode(Mode::Lines)
        .name(TEMPERATURE_LABEL)
        .line(Line::new().color(RED).width(2.0).shape(LineShape::Spline))
        .fill(Fill::ToZeroY)
        .fill_color(RED_FILL);

    let humidity = Scatter::new(series.labels.clone(), series.humidity.clone())
        .mode(Mode::Lines)
        .name(HUMIDITY_LABEL)
        .y_axis("y2")
        .line(Line::new().color(BLUE).width(2.0).shape(LineShape::Spline))
        .fill(Fill::ToZeroY)
        .fill_color(BLUE_FILL);

    let title = format!("Datos históricos de {} (últimos 30 días)", city);
    let layout = Layout::new()
        .title(Title::with_text(&title))
        .hover_mode(HoverMode::XUnified)
        .y_axis(Axis::new().title(Title::with_text(TEMPERATURE_LABEL)).side(AxisSide::Left))
        .y_axis2(
            Axis::new()
                .title(Title::with_text(HUMIDITY_LABEL))
                .overlaying("y")
                .side(AxisSide::Right)
                .show_grid(false),
        );

    ChartSpec {
        data: vec![to_value(&temperature), to_value(&humidity)],
        layout: to_value(&layout),
    }
}

/// A live chart that must be released before its render target is reused.
pub trait ChartHandle {
    fn destroy(self);
}

/// Holds at most one live chart.
#[derive(Debug)]
pub struct ChartSlot<H: ChartHandle> {
    live: Option<H>,
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<H: ChartHandle> ChartSlot<H> {
    /// Destroys the held chart, then creates and keeps the new one. If `create`
    /// fails the slot stays empty.
    pub fn replace_with<E, F>(&mut self, create: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        self.clear();
        self.live = Some(create()?);
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.live.take() {
            handle.destroy();
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly)]
    fn purge(div_id: &str);
}

/// A plotly.js chart drawn into the element with id `target`.
#[derive(Debug)]
pub struct PlotlyChart {
    target: String,
}

impl PlotlyChart {
    pub fn create(target: &str, spec: &ChartSpec) -> Result<Self, JsValue> {
        let data = js_sys::Array::new();
        for trace in &spec.data {
            data.push(&to_js(trace)?);
        }
        let layout = to_js(&spec.layout)?;
        newPlot(target, data.into(), layout);
        log::debug!("Chart drawn into #{}", target);

        Ok(Self {
            target: target.to_string(),
        })
    }
}

impl ChartHandle for PlotlyChart {
    fn destroy(self) {
        purge(&self.target);
        log::debug!("Chart in #{} purged", self.target);
    }
}

fn to_js(value: &Value) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts instances that were created and not yet destroyed.
    struct CountedHandle {
        live: Rc<Cell<i32>>,
    }

    impl CountedHandle {
        fn create(live: &Rc<Cell<i32>>) -> Result<Self, String> {
            live.set(live.get() + 1);
            Ok(Self { live: live.clone() })
        }
    }

    impl ChartHandle for CountedHandle {
        fn destroy(self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_replacing_keeps_one_live_chart() {
        let live = Rc::new(Cell::new(0));
        let mut slot = ChartSlot::default();

        slot.replace_with(|| CountedHandle::create(&live)).unwrap();
        slot.replace_with(|| CountedHandle::create(&live)).unwrap();
        assert_eq!(live.get(), 1);
        assert!(slot.is_live());

        slot.clear();
        assert_eq!(live.get(), 0);
        assert!(!slot.is_live());
    }

    #[test]
    fn test_previous_chart_is_destroyed_before_creation() {
        let live = Rc::new(Cell::new(0));
        let mut slot = ChartSlot::default();
        slot.replace_with(|| CountedHandle::create(&live)).unwrap();

        let seen_during_create = Cell::new(-1);
        slot.replace_with(|| {
            seen_during_create.set(live.get());
            CountedHandle::create(&live)
        })
        .unwrap();
        assert_eq!(seen_during_create.get(), 0);
    }

    #[test]
    fn test_failed_creation_leaves_slot_empty() {
        let live = Rc::new(Cell::new(0));
        let mut slot = ChartSlot::default();
        slot.replace_with(|| CountedHandle::create(&live)).unwrap();

        let result: Result<(), String> = slot.replace_with(|| Err("no canvas".to_string()));
        assert!(result.is_err());
        assert!(!slot.is_live());
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_forecast_chart_spec() {
        let series = ForecastSeries {
            labels: vec!["lun, 21 oct, 00".to_string(), "lun, 21 oct, 06".to_string()],
            temperatures: vec![12.0, 15.5],
        };

        let spec = forecast_chart(&series, "Lima", "PE");
        assert_eq!(spec.data.len(), 1);
        assert_eq!(spec.data[0]["name"], TEMPERATURE_LABEL);
        assert_eq!(spec.data[0]["y"], serde_json::json!([12.0, 15.5]));
        assert_eq!(spec.layout["title"]["text"], "Pronóstico de 5 días para Lima, PE");
    }

    #[test]
    fn test_historical_chart_uses_secondary_axis() {
        let series = HistoricalSeries {
            labels: vec!["1 oct".to_string()],
            temperatures: vec![18.0],
            humidity: vec![70.0],
        };

        let spec = historical_chart(&series, "Lima");
        assert_eq!(spec.data.len(), 2);
        assert_eq!(spec.data[1]["name"], HUMIDITY_LABEL);
        assert_eq!(spec.data[1]["yaxis"], "y2");
        assert_eq!(spec.layout["yaxis2"]["overlaying"], "y");
        assert_eq!(spec.layout["yaxis2"]["side"], "right");
        assert_eq!(spec.layout["yaxis2"]["showgrid"], false);
        assert_eq!(spec.layout["title"]["text"], "Datos históricos de Lima (últimos 30 días)");
    }
}
