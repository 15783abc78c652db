//! Runs a search: current, forecast and historical, strictly one after another.

use std::cell::Cell;
use std::rc::Rc;

use common::{ApiReply, DEMO_PROBE_CITY};
use thiserror::Error;
use yew::functional::UseReducerDispatcher;

use crate::api_client::weather::WeatherApi;
use crate::api_client::FetchError;
use crate::charts::{forecast_chart, historical_chart};
use crate::dashboard::{DashboardAction, DashboardState, ForecastPanel, Stage};
use crate::formatter::{current_view, forecast_series, historical_series, statistics_tiles};

pub const EMPTY_CITY_MESSAGE: &str = "Por favor, ingresa el nombre de una ciudad";
pub const TRANSPORT_MESSAGE: &str = "Error al obtener los datos. Intenta nuevamente.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("city is empty")]
    Validation,

    #[error("{stage} stage rejected by the API: {message}")]
    Backend { stage: Stage, message: String },

    #[error("{stage} stage failed: {cause}")]
    Transport { stage: Stage, cause: FetchError },
}

impl SearchError {
    /// What the error banner shows. Transport causes stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation => EMPTY_CITY_MESSAGE.to_string(),
            SearchError::Backend { message, .. } => message.clone(),
            SearchError::Transport { .. } => TRANSPORT_MESSAGE.to_string(),
        }
    }
}

/// Receives the state transitions a search produces.
pub trait DashboardSink {
    fn apply(&self, action: DashboardAction);
}

impl DashboardSink for UseReducerDispatcher<DashboardState> {
    fn apply(&self, action: DashboardAction) {
        self.dispatch(action);
    }
}

/// Hands out increasing search generations. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct SearchTickets(Rc<Cell<u64>>);

impl SearchTickets {
    pub fn next(&self) -> u64 {
        let generation = self.0.get() + 1;
        self.0.set(generation);
        generation
    }
}

/// Sends `Finished` when the search future completes or is dropped.
struct BusyGuard<'a, S: DashboardSink> {
    sink: &'a S,
    generation: u64,
}

impl<S: DashboardSink> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.sink.apply(DashboardAction::Finished {
            generation: self.generation,
        });
    }
}

pub struct Orchestrator<A: WeatherApi> {
    api: A,
    icon_host: String,
}

impl<A: WeatherApi> Orchestrator<A> {
    pub fn new(api: A, icon_host: impl Into<String>) -> Self {
        Self {
            api,
            icon_host: icon_host.into(),
        }
    }

    /// Searches `raw_city` after trimming it. An empty city shows the validation
    /// message and touches neither the network nor the busy state.
    pub async fn search<S: DashboardSink>(
        &self,
        sink: &S,
        generation: u64,
        raw_city: &str,
    ) -> Result<(), SearchError> {
        let city = raw_city.trim();
        if city.is_empty() {
            log::debug!("Search #{} rejected: empty city", generation);
            let error = SearchError::Validation;
            sink.apply(DashboardAction::ShowError(error.user_message()));
            return Err(error);
        }

        log::info!("Search #{} for '{}'", generation, city);
        sink.apply(DashboardAction::Begin { generation });
        let _busy = BusyGuard { sink, generation };

        let result = self.run_stages(sink, generation, city).await;
        if let Err(error) = &result {
            match error {
                SearchError::Transport { .. } => log::error!("Search #{} - {}", generation, error),
                _ => log::warn!("Search #{} - {}", generation, error),
            }
            sink.apply(DashboardAction::Failed {
                generation,
                message: error.user_message(),
            });
        }
        result
    }

    async fn run_stages<S: DashboardSink>(
        &self,
        sink: &S,
        generation: u64,
        city: &str,
    ) -> Result<(), SearchError> {
        let current = settle(Stage::Current, self.api.current(city).await)?;
        sink.apply(DashboardAction::CurrentLoaded {
            generation,
            view: current_view(&current, &self.icon_host),
        });

        sink.apply(DashboardAction::Fetching { generation, stage: Stage::Forecast });
        let forecast = settle(Stage::Forecast, self.api.forecast(city).await)?;
        let series = forecast_series(&forecast.forecasts);
        sink.apply(DashboardAction::ForecastLoaded {
            generation,
            panel: ForecastPanel {
                chart: Rc::new(forecast_chart(&series, &forecast.city, &forecast.country)),
                tiles: statistics_tiles(&forecast.statistics),
            },
        });

        sink.apply(DashboardAction::Fetching { generation, stage: Stage::Historical });
        let historical = settle(Stage::Historical, self.api.historical(city).await)?;
        let series = historical_series(&historical.historical_data);
        sink.apply(DashboardAction::HistoricalLoaded {
            generation,
            chart: historical_chart(&series, &historical.city),
        });

        log::debug!("Search #{} complete", generation);
        Ok(())
    }

    /// Asks for the probe city once and raises the demo notice if the backend
    /// answers with the demo sentinel. Probe failures are only logged.
    pub async fn probe_demo_mode<S: DashboardSink>(&self, sink: &S) -> bool {
        match self.api.current(DEMO_PROBE_CITY).await {
            Ok(ApiReply::Success(current)) if current.is_demo_sentinel() => {
                log::info!("Backend is running in demo mode");
                sink.apply(DashboardAction::DemoDetected);
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("Demo mode probe failed: {}", e);
                false
            }
        }
    }
}

fn settle<T>(stage: Stage, outcome: Result<ApiReply<T>, FetchError>) -> Result<T, SearchError> {
    let reply = outcome.map_err(|cause| SearchError::Transport { stage, cause })?;
    reply
        .into_result()
        .map_err(|message| SearchError::Backend { stage, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::weather::WeatherApi;
    use crate::dashboard::SearchPhase;
    use async_trait::async_trait;
    use common::{
        CurrentWeather, ErrorReply, ForecastPoint, ForecastReport, ForecastStatistics,
        HistoricalRecord, HistoricalReport,
    };
    use std::cell::RefCell;
    use yew::functional::Reducible;

    fn current(city: &str, country: &str) -> CurrentWeather {
        CurrentWeather {
            city: city.to_string(),
            country: country.to_string(),
            icon: "01d".to_string(),
            description: "cielo claro".to_string(),
            temperature: 18.0,
            feels_like: 17.5,
            humidity: 60.0,
            pressure: 1015.0,
            wind_speed: 3.2,
            timestamp: None,
        }
    }

    fn forecast(city: &str) -> ForecastReport {
        ForecastReport {
            city: city.to_string(),
            country: "FR".to_string(),
            forecasts: vec![
                ForecastPoint::new("2024-10-21 12:00:00", 14.0),
                ForecastPoint::new("2024-10-21 15:00:00", 15.0),
                ForecastPoint::new("2024-10-21 18:00:00", 13.0),
            ],
            statistics: ForecastStatistics {
                avg_temperature: 14.0,
                max_temperature: 15.0,
                min_temperature: 13.0,
                avg_humidity: 70.0,
                total_records: 3,
            },
        }
    }

    fn historical(city: &str) -> HistoricalReport {
        HistoricalReport {
            city: city.to_string(),
            historical_data: vec![HistoricalRecord {
                date: "2024-10-20".to_string(),
                temperature: 12.5,
                humidity: 71.0,
            }],
            statistics: None,
        }
    }

    /// Replies with canned payloads and records every call in order.
    struct MockApi {
        calls: RefCell<Vec<String>>,
        current: Result<ApiReply<CurrentWeather>, FetchError>,
        forecast: Result<ApiReply<ForecastReport>, FetchError>,
        historical: Result<ApiReply<HistoricalReport>, FetchError>,
        /// City whose current lookup stalls for a few polls and then fails.
        stalled: Option<&'static str>,
    }

    impl MockApi {
        fn healthy(city: &str) -> Self {
            Self {
                calls: RefCell::new(vec![]),
                current: Ok(ApiReply::Success(current(city, "FR"))),
                forecast: Ok(ApiReply::Success(forecast(city))),
                historical: Ok(ApiReply::Success(historical(city))),
                stalled: None,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl WeatherApi for MockApi {
        async fn current(&self, city: &str) -> Result<ApiReply<CurrentWeather>, FetchError> {
            self.calls.borrow_mut().push(format!("current/{}", city));
            if self.stalled == Some(city) {
                for _ in 0..5 {
                    tokio::task::yield_now().await;
                }
                return Ok(ErrorReply::new("city not found").into());
            }
            self.current.clone()
        }

        async fn forecast(&self, city: &str) -> Result<ApiReply<ForecastReport>, FetchError> {
            self.calls.borrow_mut().push(format!("forecast/{}", city));
            self.forecast.clone()
        }

        async fn historical(&self, city: &str) -> Result<ApiReply<HistoricalReport>, FetchError> {
            self.calls.borrow_mut().push(format!("historical/{}", city));
            self.historical.clone()
        }
    }

    /// Feeds every action through the real reducer.
    struct StateSink {
        state: RefCell<Rc<DashboardState>>,
        actions: RefCell<Vec<DashboardAction>>,
    }

    impl StateSink {
        fn new() -> Self {
            Self {
                state: RefCell::new(Rc::new(DashboardState::default())),
                actions: RefCell::new(vec![]),
            }
        }

        fn state(&self) -> Rc<DashboardState> {
            self.state.borrow().clone()
        }
    }

    impl DashboardSink for StateSink {
        fn apply(&self, action: DashboardAction) {
            self.actions.borrow_mut().push(action.clone());
            let next = self.state().reduce(action);
            *self.state.borrow_mut() = next;
        }
    }

    fn with_api(api: MockApi) -> Orchestrator<MockApi> {
        Orchestrator::new(api, "https://openweathermap.org/img/wn")
    }

    #[tokio::test]
    async fn test_search_calls_stages_in_order() {
        let orchestrator = with_api(MockApi::healthy("Lima"));
        let sink = StateSink::new();

        let result = orchestrator.search(&sink, 1, "  Lima ").await;

        assert!(result.is_ok());
        assert_eq!(
            orchestrator.api.calls(),
            vec!["current/Lima", "forecast/Lima", "historical/Lima"]
        );

        let state = sink.state();
        assert!(!state.busy());
        assert_eq!(state.error, None);
        assert!(state.current.is_some());
        let panel = state.forecast.as_ref().unwrap();
        assert_eq!(panel.tiles.len(), 4);
        assert_eq!(panel.chart.data[0]["x"].as_array().unwrap().len(), 2);
        assert!(state.historical.is_some());
    }

    #[tokio::test]
    async fn test_stage_results_arrive_in_order() {
        let orchestrator = with_api(MockApi::healthy("Lima"));
        let sink = StateSink::new();
        orchestrator.search(&sink, 1, "Lima").await.unwrap();

        let loaded: Vec<&str> = sink
            .actions
            .borrow()
            .iter()
            .filter_map(|action| match action {
                DashboardAction::CurrentLoaded { .. } => Some("current"),
                DashboardAction::ForecastLoaded { .. } => Some("forecast"),
                DashboardAction::HistoricalLoaded { .. } => Some("historical"),
                _ => None,
            })
            .collect();
        assert_eq!(loaded, vec!["current", "forecast", "historical"]);
        assert!(matches!(
            sink.actions.borrow().last(),
            Some(DashboardAction::Finished { generation: 1 })
        ));
    }

    #[tokio::test]
    async fn test_blank_city_makes_no_requests() {
        let orchestrator = with_api(MockApi::healthy("Lima"));
        let sink = StateSink::new();

        let result = orchestrator.search(&sink, 1, "   ").await;

        assert_eq!(result, Err(SearchError::Validation));
        assert!(orchestrator.api.calls().is_empty());
        let state = sink.state();
        assert_eq!(state.error.as_deref(), Some(EMPTY_CITY_MESSAGE));
        assert!(!state.busy());
    }

    #[tokio::test]
    async fn test_current_error_stops_chain() {
        let mut api = MockApi::healthy("Atlantis");
        api.current = Ok(ErrorReply::new("city not found").into());
        let orchestrator = with_api(api);
        let sink = StateSink::new();

        let result = orchestrator.search(&sink, 1, "Atlantis").await;

        assert!(matches!(result, Err(SearchError::Backend { stage: Stage::Current, .. })));
        assert_eq!(orchestrator.api.calls(), vec!["current/Atlantis"]);
        let state = sink.state();
        assert_eq!(state.error.as_deref(), Some("city not found"));
        assert!(state.current.is_none());
        assert!(!state.busy());
    }

    #[tokio::test]
    async fn test_forecast_error_keeps_current_weather() {
        let mut api = MockApi::healthy("Paris");
        api.forecast = Ok(ErrorReply::new("rate limited").into());
        let orchestrator = with_api(api);
        let sink = StateSink::new();

        orchestrator.search(&sink, 1, "Paris").await.unwrap_err();

        assert_eq!(orchestrator.api.calls(), vec!["current/Paris", "forecast/Paris"]);
        let state = sink.state();
        assert!(state.current.is_some());
        assert_eq!(state.error.as_deref(), Some("rate limited"));
        assert!(state.historical.is_none());
        assert_eq!(state.search_label(), crate::dashboard::SEARCH_LABEL);
    }

    #[tokio::test]
    async fn test_transport_error_is_masked() {
        let mut api = MockApi::healthy("Lima");
        api.historical = Err(FetchError::Request("connection reset".into()));
        let orchestrator = with_api(api);
        let sink = StateSink::new();

        let error = orchestrator.search(&sink, 1, "Lima").await.unwrap_err();

        assert!(error.to_string().contains("connection reset"));
        assert_eq!(sink.state().error.as_deref(), Some(TRANSPORT_MESSAGE));
        assert!(!sink.state().busy());
    }

    #[tokio::test]
    async fn test_overlapping_searches_keep_latest_result() {
        let mut api = MockApi::healthy("Lima");
        api.stalled = Some("Atlantis");
        let orchestrator = with_api(api);
        let sink = StateSink::new();

        let (slow, fast) = tokio::join!(
            orchestrator.search(&sink, 1, "Atlantis"),
            orchestrator.search(&sink, 2, "Lima"),
        );

        assert!(slow.is_err());
        assert!(fast.is_ok());
        let state = sink.state();
        assert_eq!(state.generation, 2);
        assert_eq!(state.phase, SearchPhase::Done);
        assert_eq!(state.error, None);
        assert!(!state.busy());
        assert!(state.historical.is_some());
    }

    #[tokio::test]
    async fn test_begin_is_the_only_current_stage_action() {
        let orchestrator = with_api(MockApi::healthy("Lima"));
        let sink = StateSink::new();
        orchestrator.search(&sink, 1, "Lima").await.unwrap();

        let stages: Vec<Stage> = sink
            .actions
            .borrow()
            .iter()
            .filter_map(|action| match action {
                DashboardAction::Fetching { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![Stage::Forecast, Stage::Historical]);
    }

    #[tokio::test]
    async fn test_demo_probe_detects_sentinel() {
        let mut api = MockApi::healthy("Madrid");
        api.current = Ok(ApiReply::Success(current("Madrid", "Demo")));
        let orchestrator = with_api(api);
        let sink = StateSink::new();

        assert!(orchestrator.probe_demo_mode(&sink).await);
        assert!(sink.state().demo_mode);
        assert_eq!(orchestrator.api.calls(), vec!["current/Madrid"]);
    }

    #[tokio::test]
    async fn test_demo_probe_ignores_real_data_and_failures() {
        let orchestrator = with_api(MockApi::healthy("Madrid"));
        let sink = StateSink::new();
        assert!(!orchestrator.probe_demo_mode(&sink).await);

        let mut api = MockApi::healthy("Madrid");
        api.current = Err(FetchError::Request("offline".into()));
        let orchestrator = with_api(api);
        assert!(!orchestrator.probe_demo_mode(&sink).await);

        assert!(!sink.state().demo_mode);
        assert_eq!(sink.state().error, None);
    }

    #[test]
    fn test_tickets_increase_across_clones() {
        let tickets = SearchTickets::default();
        let shared = tickets.clone();
        assert_eq!(tickets.next(), 1);
        assert_eq!(shared.next(), 2);
        assert_eq!(tickets.next(), 3);
    }
}
