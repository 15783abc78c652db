use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub input_ref: NodeRef,
    pub default_city: AttrValue,
    pub busy: bool,
    pub label: AttrValue,
    pub on_search: Callback<()>,
}

/// City input plus search button. Enter in the input searches too.
#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let on_click = {
        let on_search = props.on_search.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Search button clicked");
            on_search.emit(())
        })
    };

    let on_keypress = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                log::debug!("Enter pressed in city input");
                on_search.emit(())
            }
        })
    };

    html! {
        <div class="search-container">
            <input
                id="city-input"
                type="text"
                placeholder="Ingresa una ciudad"
                ref={props.input_ref.clone()}
                value={props.default_city.clone()}
                onkeypress={on_keypress}
            />
            <button id="search-btn" disabled={props.busy} onclick={on_click}>
                {&props.label}
            </button>
        </div>
    }
}

/// Current text of the city input, empty when it is not mounted.
pub fn input_value(input_ref: &NodeRef) -> String {
    input_ref
        .cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}
