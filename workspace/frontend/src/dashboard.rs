//! Dashboard state: banners, busy affordance and the last rendered results.

use std::fmt;
use std::rc::Rc;

use yew::functional::Reducible;

use crate::charts::ChartSpec;
use crate::formatter::{CurrentWeatherView, StatTile};

pub const SEARCH_LABEL: &str = "Buscar";
pub const SEARCHING_LABEL: &str = "Buscando...";

/// One fetch and render step of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Current,
    Forecast,
    Historical,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Current => "current",
            Stage::Forecast => "forecast",
            Stage::Historical => "historical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Fetching(Stage),
    Done,
    Failed,
}

impl SearchPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Fetching(_))
    }
}

/// Forecast chart together with the statistics tiles of the same reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPanel {
    pub chart: Rc<ChartSpec>,
    pub tiles: Vec<StatTile>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    /// Generation of the latest search that began. Results tagged with any
    /// other generation are dropped.
    pub generation: u64,
    pub phase: SearchPhase,
    pub error: Option<String>,
    pub demo_mode: bool,
    pub current: Option<CurrentWeatherView>,
    pub forecast: Option<ForecastPanel>,
    pub historical: Option<Rc<ChartSpec>>,
}

impl DashboardState {
    pub fn busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn search_label(&self) -> &'static str {
        if self.busy() {
            SEARCHING_LABEL
        } else {
            SEARCH_LABEL
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// A new search passed validation.
    Begin { generation: u64 },
    Fetching { generation: u64, stage: Stage },
    CurrentLoaded { generation: u64, view: CurrentWeatherView },
    ForecastLoaded { generation: u64, panel: ForecastPanel },
    HistoricalLoaded { generation: u64, chart: ChartSpec },
    Failed { generation: u64, message: String },
    /// Sent exactly once per begun search, whatever its outcome.
    Finished { generation: u64 },
    /// Error that belongs to no search, e.g. an empty city.
    ShowError(String),
    DemoDetected,
}

impl DashboardAction {
    fn generation(&self) -> Option<u64> {
        match self {
            Self::Begin { generation }
            | Self::Fetching { generation, .. }
            | Self::CurrentLoaded { generation, .. }
            | Self::ForecastLoaded { generation, .. }
            | Self::HistoricalLoaded { generation, .. }
            | Self::Failed { generation, .. }
            | Self::Finished { generation } => Some(*generation),
            Self::ShowError(_) | Self::DemoDetected => None,
        }
    }
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match (&action, action.generation()) {
            (DashboardAction::Begin { generation }, _) if *generation <= self.generation => {
                log::debug!("Ignoring out-of-order search #{}", generation);
                return self;
            }
            (DashboardAction::Begin { .. }, _) => {}
            (_, Some(generation)) if generation != self.generation => {
                log::debug!(
                    "Dropping result of superseded search #{} (latest #{})",
                    generation,
                    self.generation
                );
                return self;
            }
            _ => {}
        }

        let mut next = (*self).clone();
        match action {
            DashboardAction::Begin { generation } => {
                next.generation = generation;
                next.error = None;
                next.phase = SearchPhase::Fetching(Stage::Current);
            }
            DashboardAction::Fetching { stage, .. } => {
                next.phase = SearchPhase::Fetching(stage);
            }
            DashboardAction::CurrentLoaded { view, .. } => {
                next.current = Some(view);
            }
            DashboardAction::ForecastLoaded { panel, .. } => {
                next.forecast = Some(panel);
            }
            DashboardAction::HistoricalLoaded { chart, .. } => {
                next.historical = Some(Rc::new(chart));
                next.phase = SearchPhase::Done;
            }
            DashboardAction::Failed { message, .. } => {
                next.error = Some(message);
                next.phase = SearchPhase::Failed;
            }
            DashboardAction::Finished { .. } => {
                if next.phase.is_busy() {
                    next.phase = SearchPhase::Idle;
                }
            }
            DashboardAction::ShowError(message) => {
                next.error = Some(message);
            }
            DashboardAction::DemoDetected => {
                next.demo_mode = true;
            }
        }

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
