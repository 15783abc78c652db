use yew::prelude::*;

use crate::formatter::StatTile;

#[derive(Properties, PartialEq)]
pub struct StatisticsProps {
    pub tiles: Vec<StatTile>,
}

#[function_component(StatisticsPanel)]
pub fn statistics_panel(props: &StatisticsProps) -> Html {
    html! {
        <div id="stats-container" class="stats">
            {for props.tiles.iter().map(|tile| html! {
                <div class="stat-box">
                    <div class="stat-value">{&tile.value}</div>
                    <div class="stat-label">{tile.label}</div>
                </div>
            })}
        </div>
    }
}
