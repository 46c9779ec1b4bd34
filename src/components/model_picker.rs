use crate::model::ModelInfo;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ModelPickerProps {
    pub models: Vec<ModelInfo>,
    pub selected: Option<usize>,
    pub on_select: Callback<usize>,
}

/// Catalog screen: pick an animal, then enter the viewer.
#[function_component]
pub fn ModelPicker(props: &ModelPickerProps) -> Html {
    html! {<div style="min-height:100vh; background:#0e1116; color:#e6edf3; padding:24px;">
        <h2 style="margin:0 0 4px 0;">{"AR Wildlife"}</h2>
        <p style="margin:0 0 16px 0; opacity:0.7;">{"Choose an animal to place in your space."}</p>
        <div style="display:flex; flex-wrap:wrap; gap:12px;">
            { for props.models.iter().enumerate().map(|(i, m)| {
                let on_select = props.on_select.clone();
                let pick = Callback::from(move |_| on_select.emit(i));
                let highlighted = props.selected == Some(i);
                let border = if highlighted { "1px solid #58a6ff" } else { "1px solid #30363d" };
                html!{<div style={format!("background:#161b22; border:{}; border-radius:12px; padding:14px 16px; width:220px; display:flex; flex-direction:column; gap:8px;", border)}>
                    <div style="font-size:17px; font-weight:600;">{ m.name.clone() }</div>
                    <div style="font-size:12px; opacity:0.75;">{ m.habitat.clone() }</div>
                    <button onclick={pick}>{"View in AR"}</button>
                </div>}
            }) }
        </div>
    </div>}
}
