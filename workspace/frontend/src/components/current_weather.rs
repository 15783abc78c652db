use yew::prelude::*;

use crate::formatter::CurrentWeatherView;

#[derive(Properties, PartialEq)]
pub struct CurrentWeatherProps {
    pub view: Option<CurrentWeatherView>,
}

/// Hidden until the first current-weather stage succeeds.
#[function_component(CurrentWeatherCard)]
pub fn current_weather_card(props: &CurrentWeatherProps) -> Html {
    let Some(view) = &props.view else {
        return html! {};
    };

    html! {
        <section id="current-weather-section" class="current-weather">
            <div class="weather-main">
                <img id="weather-icon" src={view.icon_url.clone()} alt={view.icon_alt.clone()} />
                <div>
                    <div id="temperature" class="temperature">{&view.temperature}</div>
                    <div id="weather-description" class="description">{&view.description}</div>
                </div>
            </div>
            <div class="weather-details">
                <Detail label="Sensación térmica" id="feels-like" value={view.feels_like.clone()} />
                <Detail label="Humedad" id="humidity" value={view.humidity.clone()} />
                <Detail label="Presión" id="pressure" value={view.pressure.clone()} />
                <Detail label="Viento" id="wind-speed" value={view.wind_speed.clone()} />
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct DetailProps {
    label: AttrValue,
    id: AttrValue,
    value: AttrValue,
}

#[function_component(Detail)]
fn detail(props: &DetailProps) -> Html {
    html! {
        <div class="detail">
            <span class="detail-label">{&props.label}</span>
            <span id={props.id.clone()} class="detail-value">{&props.value}</span>
        </div>
    }
}
