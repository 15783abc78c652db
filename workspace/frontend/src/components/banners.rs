use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

/// Shows the latest error, hidden when there is none.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.message {
        Some(message) => {
            log::warn!("Displaying error to user: {}", message);
            html! { <div id="error-message" class="error-message">{message}</div> }
        }
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct DemoNoticeProps {
    pub visible: bool,
}

#[function_component(DemoNotice)]
pub fn demo_notice(props: &DemoNoticeProps) -> Html {
    if !props.visible {
        return html! {};
    }

    html! {
        <div id="demo-notice" class="demo-notice">
            {"Modo demostración: los datos mostrados son simulados. Configura una API key de OpenWeatherMap para ver datos reales."}
        </div>
    }
}
