use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub placed: bool,
    pub on_remove: Callback<()>,
    pub on_toggle_info: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub to_picker: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let remove_cb = {
        let cb = props.on_remove.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let info_cb = {
        let cb = props.on_toggle_info.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let picker_cb = {
        let cb = props.to_picker.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:76px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:160px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={remove_cb} disabled={!props.placed}>{"Remove"}</button>
        <button onclick={info_cb} disabled={!props.placed}>{"Animal Info"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
        <button onclick={picker_cb}>{"Change Animal"}</button>
    </div>}
}
