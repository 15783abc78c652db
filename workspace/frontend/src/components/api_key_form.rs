use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Page address that hands `key` to the server as a query parameter, `None` for
/// a blank key.
pub fn api_key_redirect(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(format!("/?api_key={}", key))
    }
}

/// Footer link that reveals an inline form for an OpenWeatherMap key.
#[function_component(ApiKeyForm)]
pub fn api_key_form() -> Html {
    let revealed = use_state(|| false);
    let input_ref = use_node_ref();

    let on_reveal = {
        let revealed = revealed.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            revealed.set(true);
        })
    };

    let on_save = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let key = input_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let Some(target) = api_key_redirect(&key) else {
                return;
            };
            log::info!("Reloading with a user supplied API key");
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&target) {
                    log::error!("Failed to navigate: {:?}", e);
                }
            }
        })
    };

    html! {
        <div class="api-key">
            <a id="api-key-link" href="#" onclick={on_reveal}>{"Configurar API Key"}</a>
            if *revealed {
                <div class="api-key-form">
                    <h3>{"Configurar API Key de OpenWeatherMap"}</h3>
                    <p>
                        {"Para obtener datos reales, necesitas una API key gratuita de "}
                        <a href="https://openweathermap.org/api" target="_blank">{"OpenWeatherMap"}</a>
                        {"."}
                    </p>
                    <input id="api-key-input" type="text" placeholder="Pega tu API key aquí" ref={input_ref} />
                    <button id="save-api-key" onclick={on_save}>{"Guardar"}</button>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_carries_trimmed_key() {
        assert_eq!(api_key_redirect("  abc123 "), Some("/?api_key=abc123".to_string()));
    }

    #[test]
    fn test_blank_key_does_not_redirect() {
        assert_eq!(api_key_redirect("   "), None);
        assert_eq!(api_key_redirect(""), None);
    }
}
