use super::{ar_view::ArView, model_picker::ModelPicker};
use crate::model::{default_catalog, InteractionConfig, SceneAction, SceneState};
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Picker,
    Viewer,
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Picker);
    let scene = use_reducer(|| SceneState::with_catalog(default_catalog()));
    let config = use_state(InteractionConfig::default);

    // Load persisted interaction settings
    {
        let config = config.clone();
        use_effect_with((), move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(Some(raw)) = store.get_item("arw_config") {
                        if let Ok(cfg) = serde_json::from_str(&raw) {
                            config.set(cfg);
                        }
                    }
                }
            }
            || ()
        });
    }
    // Persist interaction settings on change
    {
        let config = config.clone();
        use_effect_with(*config, move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(s) = serde_json::to_string(&*config) {
                        let _ = store.set_item("arw_config", &s);
                    }
                }
            }
            || ()
        });
    }

    let on_select = {
        let view = view.clone();
        let scene = scene.clone();
        Callback::from(move |i: usize| {
            scene.dispatch(SceneAction::Select(i));
            view.set(View::Viewer);
        })
    };
    let to_picker = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Picker))
    };
    let on_config_change = {
        let config = config.clone();
        Callback::from(move |cfg: InteractionConfig| config.set(cfg))
    };

    match *view {
        View::Picker => html! {
            <ModelPicker
                models={scene.models.clone()}
                selected={scene.selected}
                on_select={on_select}
            />
        },
        View::Viewer => html! {
            <ArView
                scene={scene}
                config={*config}
                on_config_change={on_config_change}
                to_picker={to_picker}
            />
        },
    }
}
