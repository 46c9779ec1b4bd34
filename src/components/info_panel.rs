use crate::model::ModelInfo;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InfoPanelProps {
    pub model: ModelInfo,
    pub on_close: Callback<()>,
}

/// Facts card for the selected animal, shown over the viewer.
#[function_component]
pub fn InfoPanel(props: &InfoPanelProps) -> Html {
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let row = |label: &str, value: &str| {
        html! {<div style="display:flex; flex-direction:column; gap:2px;">
            <span style="font-size:11px; text-transform:uppercase; opacity:0.6;">{ label.to_string() }</span>
            <span style="font-size:13px; line-height:1.4;">{ value.to_string() }</span>
        </div>}
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; max-width:320px; background:rgba(22,27,34,0.94); border:1px solid #30363d; border-radius:12px; padding:14px 16px; display:flex; flex-direction:column; gap:10px; color:#e6edf3;">
        <div style="display:flex; justify-content:space-between; align-items:center;">
            <h3 style="margin:0; font-size:16px;">{ props.model.name.clone() }</h3>
            <button onclick={close_cb} style="padding:2px 8px;">{"Close"}</button>
        </div>
        { row("Habitat", &props.model.habitat) }
        { row("Diet", &props.model.diet) }
        { row("Characteristics", &props.model.characteristics) }
    </div>}
}
