use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub mod api_client;
pub mod charts;
mod components;
pub mod dashboard;
pub mod formatter;
pub mod orchestrator;
pub mod settings;

use api_client::weather::HttpWeatherApi;
use components::api_key_form::ApiKeyForm;
use components::banners::{DemoNotice, ErrorBanner};
use components::chart_panel::ChartPanel;
use components::current_weather::CurrentWeatherCard;
use components::search_bar::{input_value, SearchBar};
use components::statistics::StatisticsPanel;
use dashboard::DashboardState;
use orchestrator::{Orchestrator, SearchTickets};

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_memo((), |_| settings::get_settings());
    let state = use_reducer(DashboardState::default);
    let tickets = use_memo((), |_| SearchTickets::default());
    let orchestrator = {
        let settings = settings.clone();
        use_memo((), move |_| {
            Orchestrator::new(
                HttpWeatherApi::new(settings.api_base_url()),
                settings.icon_host.clone(),
            )
        })
    };
    let input_ref = use_node_ref();

    let on_search = {
        let dispatcher = state.dispatcher();
        let orchestrator = orchestrator.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: ()| {
            let city = input_value(&input_ref);
            let generation = tickets.next();
            let dispatcher = dispatcher.clone();
            let orchestrator = orchestrator.clone();
            spawn_local(async move {
                let _ = orchestrator.search(&dispatcher, generation, &city).await;
            });
        })
    };

    {
        let dispatcher = state.dispatcher();
        let orchestrator = orchestrator.clone();
        let on_search = on_search.clone();
        use_effect_with((), move |_| {
            log::debug!("Dashboard mounted, probing for demo mode");
            spawn_local(async move {
                orchestrator.probe_demo_mode(&dispatcher).await;
            });
            on_search.emit(());
            || ()
        });
    }

    html! {
        <div class="container">
            <header>
                <h1>{"Dashboard del Clima"}</h1>
            </header>
            <DemoNotice visible={state.demo_mode} />
            <SearchBar
                input_ref={input_ref}
                default_city={settings.default_city.clone()}
                busy={state.busy()}
                label={state.search_label()}
                on_search={on_search}
            />
            <ErrorBanner message={state.error.clone()} />
            <CurrentWeatherCard view={state.current.clone()} />
            <section class="forecast">
                <ChartPanel
                    target="forecast-chart"
                    spec={state.forecast.as_ref().map(|panel| panel.chart.clone())}
                />
                if let Some(panel) = &state.forecast {
                    <StatisticsPanel tiles={panel.tiles.clone()} />
                }
            </section>
            <section class="historical">
                <ChartPanel target="historical-chart" spec={state.historical.clone()} />
            </section>
            <footer>
                <ApiKeyForm />
            </footer>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Weather Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
}
