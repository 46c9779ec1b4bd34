use crate::model::{InteractionConfig, ScaleBounds};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub config: InteractionConfig,
    pub on_close: Callback<()>,
    pub on_change: Callback<InteractionConfig>,
}

/// Gesture settings. Every edit is emitted immediately; the engine reads
/// the config at gesture time, so changes apply on the next tick.
#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let emit = |f: fn(InteractionConfig) -> InteractionConfig,
                cfg: InteractionConfig,
                cb: Callback<InteractionConfig>| {
        Callback::from(move |_| cb.emit(f(cfg)))
    };
    let toggle_drag = emit(
        |mut c| {
            c.enable_drag = !c.enable_drag;
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let toggle_rotation = emit(
        |mut c| {
            c.enable_rotation = !c.enable_rotation;
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let toggle_scale = emit(
        |mut c| {
            c.enable_scale = !c.enable_scale;
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let speed_down = emit(
        |mut c| {
            c.rotation_speed = (c.rotation_speed - 0.1).max(0.1);
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let speed_up = emit(
        |mut c| {
            c.rotation_speed = (c.rotation_speed + 0.1).min(2.0);
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let min_down = emit(
        |mut c| {
            c.scale_bounds = ScaleBounds::new(c.scale_bounds.min - 0.05, c.scale_bounds.max);
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let min_up = emit(
        |mut c| {
            c.scale_bounds = ScaleBounds::new(c.scale_bounds.min + 0.05, c.scale_bounds.max);
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let max_down = emit(
        |mut c| {
            c.scale_bounds = ScaleBounds::new(c.scale_bounds.min, c.scale_bounds.max - 0.5);
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let max_up = emit(
        |mut c| {
            c.scale_bounds = ScaleBounds::new(c.scale_bounds.min, (c.scale_bounds.max + 0.5).min(10.0));
            c
        },
        props.config,
        props.on_change.clone(),
    );
    let reset_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(InteractionConfig::default()))
    };

    let stepper = |label: String, value: String, down: Callback<MouseEvent>, up: Callback<MouseEvent>| {
        html! {<div style="display:flex; align-items:center; justify-content:space-between; gap:8px;">
            <span>{ label }</span>
            <span style="display:flex; align-items:center; gap:6px;">
                <button onclick={down} style="padding:2px 8px;">{"-"}</button>
                <span style="min-width:44px; text-align:center;">{ value }</span>
                <button onclick={up} style="padding:2px 8px;">{"+"}</button>
            </span>
        </div>}
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:440px; display:flex; flex-direction:column; gap:14px; color:#e6edf3;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Interaction Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.config.enable_drag} onclick={toggle_drag} />
                    <span>{"One-finger drag"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.config.enable_rotation} onclick={toggle_rotation} />
                    <span>{"Two-finger rotate"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.config.enable_scale} onclick={toggle_scale} />
                    <span>{"Pinch to scale"}</span>
                </label>
                { stepper("Rotation speed".to_string(), format!("{:.1}", props.config.rotation_speed), speed_down, speed_up) }
                { stepper("Min scale".to_string(), format!("{:.2}", props.config.scale_bounds.min), min_down, min_up) }
                { stepper("Max scale".to_string(), format!("{:.1}", props.config.scale_bounds.max), max_down, max_up) }
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={reset_cb} style="flex:1;">{"Reset to Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
