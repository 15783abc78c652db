use std::rc::Rc;

use yew::prelude::*;

use crate::charts::{ChartSlot, ChartSpec, PlotlyChart};

#[derive(Properties, PartialEq)]
pub struct ChartPanelProps {
    /// Element id the chart is drawn into
    pub target: AttrValue,
    pub spec: Option<Rc<ChartSpec>>,
}

/// Owns one chart slot: new chart data replaces the live chart, unmounting purges it.
#[function_component(ChartPanel)]
pub fn chart_panel(props: &ChartPanelProps) -> Html {
    let slot = use_mut_ref(ChartSlot::<PlotlyChart>::default);

    {
        let slot = slot.clone();
        let target = props.target.clone();
        use_effect_with(props.spec.clone(), move |spec| {
            let mut slot = slot.borrow_mut();
            match spec {
                Some(spec) => {
                    if let Err(e) = slot.replace_with(|| PlotlyChart::create(&target, spec)) {
                        log::error!("Failed to draw chart #{}: {:?}", target, e);
                    }
                }
                None => slot.clear(),
            }
            || ()
        });
    }

    {
        let slot = slot.clone();
        use_effect_with((), move |_| move || slot.borrow_mut().clear());
    }

    html! {
        <div class="chart-container" hidden={props.spec.is_none()}>
            <div id={props.target.clone()} class="chart"></div>
        </div>
    }
}
