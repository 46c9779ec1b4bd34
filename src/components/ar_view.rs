use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, TouchEvent};
use yew::prelude::*;

use glam::{Quat, Vec2, Vec3};

use super::controls_panel::ControlsPanel;
use super::info_panel::InfoPanel;
use super::settings_modal::SettingsModal;
use crate::model::{InteractionConfig, Pose, SceneAction, SceneState};
use crate::state::collide::ColliderShape;
use crate::state::indicator::{indicator_pose, indicator_scale, IndicatorStyle};
use crate::state::{
    ArCamera, ArSession, CameraProbe, ContactTracker, PlaneField, SceneEvent, TrackedPlane,
    UiRegions,
};
use crate::util::{clog, now_secs};

/// Synthetic contact id used by the desktop mouse fallback; touch
/// identifiers are small integers and never collide with it.
const MOUSE_CONTACT_ID: u32 = 0xffff;

/// The shell stands in for a device camera: a fixed pose above the floor,
/// pitched down so the reticle lands on the tracked plane.
fn shell_camera(width: f64, height: f64) -> ArCamera {
    ArCamera::new(
        Pose::new(Vec3::new(0.0, 1.7, 1.2), Quat::from_rotation_x(-0.6)),
        std::f32::consts::FRAC_PI_3,
        Vec2::new(width as f32, height as f32),
    )
}

/// Screen rectangles covered by the DOM overlays (status bar, controls).
/// Touches here are invisible to the engine.
fn ui_regions(width: f32) -> UiRegions {
    UiRegions {
        rects: vec![
            (Vec2::ZERO, Vec2::new(width, 64.0)),
            (Vec2::new(width - 190.0, 76.0), Vec2::new(width, 250.0)),
        ],
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ArViewProps {
    pub scene: UseReducerHandle<SceneState>,
    pub config: InteractionConfig,
    pub on_config_change: Callback<InteractionConfig>,
    pub to_picker: Callback<()>,
}

#[function_component(ArView)]
pub fn ar_view(props: &ArViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(ArSession::new);
    let tracker = use_mut_ref(ContactTracker::default);
    let planes = use_mut_ref(|| PlaneField {
        planes: vec![TrackedPlane {
            center: Vec3::ZERO,
            half_extents: Vec2::splat(0.25),
        }],
    });
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let scene_ref = use_mut_ref(|| props.scene.clone());
    let config_ref = use_mut_ref(InteractionConfig::default);
    let status = use_state(String::new);
    let show_settings = use_state(|| false);

    // Keep the refs the tick closure reads in sync with the latest props.
    {
        let scene_ref = scene_ref.clone();
        let handle = props.scene.clone();
        use_effect_with(props.scene.clone(), move |_| {
            *scene_ref.borrow_mut() = handle;
            || ()
        });
    }
    {
        let config_ref = config_ref.clone();
        let cfg = props.config;
        use_effect_with(cfg, move |_| {
            *config_ref.borrow_mut() = cfg;
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let session_setup = session.clone();
        let tracker_setup = tracker.clone();
        let planes_setup = planes.clone();
        let draw_ref_setup = draw_ref.clone();
        let scene_ref_setup = scene_ref.clone();
        let config_ref_setup = config_ref.clone();
        let status_setup = status.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let document = document.clone();
                let window = window.clone();
                move || {
                    let bar_height: f64 = document
                        .get_element_by_id("top-bar")
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                        .map(|el| el.client_height() as f64)
                        .unwrap_or(0.0);
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0)
                        - bar_height;
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            compute_and_apply_canvas_size();

            // Build draw closure and store in draw_ref.
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let session = session_setup.clone();
                let planes = planes_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let cam = shell_camera(w, h);
                    ctx.set_fill_style_str("#0e1116");
                    ctx.fill_rect(0.0, 0.0, w, h);

                    let project = |p: Vec3| cam.world_to_screen(p);
                    let stroke_loop = |ctx: &CanvasRenderingContext2d, pts: &[Vec2], close: bool| {
                        if pts.len() < 2 {
                            return;
                        }
                        ctx.begin_path();
                        ctx.move_to(pts[0].x as f64, pts[0].y as f64);
                        for p in &pts[1..] {
                            ctx.line_to(p.x as f64, p.y as f64);
                        }
                        if close {
                            ctx.close_path();
                        }
                        ctx.stroke();
                    };
                    let circle_points = |center: Vec3, radius: f32| -> Vec<Vec2> {
                        (0..=24)
                            .filter_map(|i| {
                                let a = i as f32 / 24.0 * std::f32::consts::TAU;
                                project(center + Vec3::new(a.cos() * radius, 0.0, a.sin() * radius))
                            })
                            .collect()
                    };

                    // Tracked plane patches.
                    for plane in &planes.borrow().planes {
                        let (cx, cz) = (plane.center.x, plane.center.z);
                        let (hx, hz) = (plane.half_extents.x, plane.half_extents.y);
                        let corners: Vec<Vec2> = [
                            Vec3::new(cx - hx, plane.center.y, cz - hz),
                            Vec3::new(cx + hx, plane.center.y, cz - hz),
                            Vec3::new(cx + hx, plane.center.y, cz + hz),
                            Vec3::new(cx - hx, plane.center.y, cz + hz),
                        ]
                        .into_iter()
                        .filter_map(project)
                        .collect();
                        if corners.len() == 4 {
                            ctx.set_stroke_style_str("#2f3641");
                            ctx.set_line_width(1.0);
                            stroke_loop(&ctx, &corners, true);
                        }
                    }

                    let sess = session.borrow();

                    // Placement indicator (only while nothing is placed).
                    if sess.placement.indicator_visible() {
                        if let Some(candidate) = sess.placement.candidate() {
                            let style = IndicatorStyle::default();
                            let t = sess.elapsed_secs();
                            let pose = indicator_pose(&candidate, t, &style);
                            let r = 0.4 * indicator_scale(t, &style);
                            ctx.set_stroke_style_str("#3fb950");
                            ctx.set_line_width(2.0);
                            stroke_loop(&ctx, &circle_points(pose.position, r), true);
                            // Heading tick shows the spin.
                            let tip = pose.position + pose.rotation * Vec3::Z * (r * 1.35);
                            if let (Some(a), Some(b)) = (project(pose.position), project(tip)) {
                                stroke_loop(&ctx, &[a, b], false);
                            }
                        }
                    }

                    // Placed object: footprint, heading, label.
                    if let Some(obj) = sess.placement.placed() {
                        let radius = obj
                            .colliders
                            .first()
                            .map(|c| match c.shape {
                                ColliderShape::Aabb { half_extents } => half_extents.x,
                                ColliderShape::Sphere { radius } => radius,
                            })
                            .unwrap_or(0.5)
                            * obj.scale.x;
                        ctx.set_stroke_style_str("#e3b341");
                        ctx.set_line_width(2.0);
                        stroke_loop(&ctx, &circle_points(obj.pose.position, radius), true);
                        let tip = obj.pose.position + obj.pose.rotation * Vec3::Z * (radius * 1.4);
                        if let (Some(a), Some(b)) = (project(obj.pose.position), project(tip)) {
                            stroke_loop(&ctx, &[a, b], false);
                        }
                        if let Some(p) = project(obj.pose.position) {
                            ctx.set_fill_style_str("#e6edf3");
                            let _ = ctx.fill_text(&obj.model_key, (p.x + 8.0) as f64, (p.y - 8.0) as f64);
                        }
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure);

            // Engine tick: contacts in, events out, then redraw.
            let last_tick = Rc::new(RefCell::new(now_secs()));
            let last_status = Rc::new(RefCell::new(String::new()));
            let tick_cb = {
                let canvas = canvas.clone();
                let session = session_setup.clone();
                let tracker = tracker_setup.clone();
                let planes = planes_setup.clone();
                let scene_ref = scene_ref_setup.clone();
                let config_ref = config_ref_setup.clone();
                let draw_ref = draw_ref_setup.clone();
                let status = status_setup.clone();
                Closure::wrap(Box::new(move || {
                    let now = now_secs();
                    let dt = (now - *last_tick.borrow()).clamp(0.0, 0.1) as f32;
                    *last_tick.borrow_mut() = now;

                    // Simulated tracking acquisition: the patch grows until
                    // the whole floor is known.
                    planes.borrow_mut().grow(dt, 0.6, Vec2::splat(3.0));

                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let cam = shell_camera(w, h);
                    let contacts = tracker.borrow_mut().frame();
                    let scene = scene_ref.borrow().clone();
                    let selection = (*scene).selected_model().cloned();
                    let cfg = *config_ref.borrow();

                    let events = {
                        let planes = planes.borrow();
                        let probe = CameraProbe {
                            planes: &planes,
                            camera: &cam,
                        };
                        session.borrow_mut().tick(
                            dt,
                            &cam,
                            &probe,
                            &ui_regions(w as f32),
                            &contacts,
                            selection.as_ref(),
                            &cfg,
                        )
                    };
                    for ev in events {
                        match ev {
                            SceneEvent::PlacementCommitted => {
                                if let Some(m) = &selection {
                                    clog(&format!("placed: {}", m.name));
                                }
                                scene.dispatch(SceneAction::ObjectPlaced);
                            }
                            SceneEvent::PlacementRemoved => {
                                scene.dispatch(SceneAction::ObjectRemoved);
                            }
                            SceneEvent::PlacementFailed(err) => {
                                clog(&format!("placement skipped: {err}"));
                            }
                            SceneEvent::DragStarted => clog("drag started"),
                            SceneEvent::DragEnded => clog("drag ended"),
                        }
                    }

                    let text = {
                        let sess = session.borrow();
                        if sess.placement.placed().is_some() {
                            "Drag, rotate, or pinch to resize the animal.".to_string()
                        } else if sess.placement.candidate_valid() {
                            match &selection {
                                Some(m) => format!("Tap to place the {}.", m.name.to_lowercase()),
                                None => "Select an animal first.".to_string(),
                            }
                        } else {
                            "Point the camera at a flat surface.".to_string()
                        }
                    };
                    if *last_status.borrow() != text {
                        *last_status.borrow_mut() = text.clone();
                        status.set(text);
                    }

                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut()>)
            };
            let tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    tick_cb.as_ref().unchecked_ref(),
                    16,
                )
                .unwrap();

            // Touch events feed the contact tracker; the engine consumes
            // them on the next tick.
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let rect = canvas_tc.get_bounding_client_rect();
                    let list = e.changed_touches();
                    let mut tracker = tracker_tc.borrow_mut();
                    for i in 0..list.length() {
                        if let Some(t) = list.item(i) {
                            let x = t.client_x() as f64 - rect.left();
                            let y = t.client_y() as f64 - rect.top();
                            tracker.begin(t.identifier() as u32, Vec2::new(x as f32, y as f32));
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let rect = canvas_tc.get_bounding_client_rect();
                    let list = e.changed_touches();
                    let mut tracker = tracker_tc.borrow_mut();
                    for i in 0..list.length() {
                        if let Some(t) = list.item(i) {
                            let x = t.client_x() as f64 - rect.left();
                            let y = t.client_y() as f64 - rect.top();
                            tracker.update(t.identifier() as u32, Vec2::new(x as f32, y as f32));
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let cancel = e.type_() == "touchcancel";
                    let list = e.changed_touches();
                    let mut tracker = tracker_tc.borrow_mut();
                    for i in 0..list.length() {
                        if let Some(t) = list.item(i) {
                            let id = t.identifier() as u32;
                            if cancel {
                                tracker.cancel(id);
                            } else {
                                tracker.end(id);
                            }
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Desktop fallback: the mouse acts as a single contact.
            let mousedown_cb = {
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() == 0 {
                        tracker_tc.borrow_mut().begin(
                            MOUSE_CONTACT_ID,
                            Vec2::new(e.offset_x() as f32, e.offset_y() as f32),
                        );
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mousemove_cb = {
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    // No-op unless a mouse contact is live.
                    tracker_tc.borrow_mut().update(
                        MOUSE_CONTACT_ID,
                        Vec2::new(e.offset_x() as f32, e.offset_y() as f32),
                    );
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mouseup_cb = {
                let tracker_tc = tracker_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    tracker_tc.borrow_mut().end(MOUSE_CONTACT_ID);
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            // Wheel scales the placed object, clamped like a pinch.
            let wheel_cb = {
                let session = session_setup.clone();
                let config_ref = config_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let cfg = *config_ref.borrow();
                    if !cfg.enable_scale {
                        return;
                    }
                    let factor = (-e.delta_y() * 0.001).exp() as f32;
                    let mut sess = session.borrow_mut();
                    if let Some(obj) = sess.placement.placed_mut() {
                        let candidate = obj.scale * factor;
                        obj.set_scale_clamped(candidate, &cfg.scale_bounds);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            let resize_cb = {
                let compute_and_apply_canvas_size = compute_and_apply_canvas_size.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                window_clone.clear_interval_with_handle(tick_id);
                // No listeners left to feed the tracker; drop any contacts
                // still mid-flight.
                tracker_setup.borrow_mut().clear();
                let _keep_alive = (
                    &tick_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &wheel_cb,
                    &resize_cb,
                );
            }
        });
    }

    let on_remove = {
        let session = session.clone();
        let scene = props.scene.clone();
        Callback::from(move |_| {
            for ev in session.borrow_mut().remove_object() {
                if ev == SceneEvent::PlacementRemoved {
                    clog("animal removed");
                    scene.dispatch(SceneAction::ObjectRemoved);
                }
            }
        })
    };
    let on_toggle_info = {
        let scene = props.scene.clone();
        Callback::from(move |_| {
            scene.dispatch(SceneAction::SetShowInfo(!scene.show_info));
        })
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    let scene = &props.scene;
    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116; color:#e6edf3;">
        <div id="top-bar" style="height:64px; display:flex; align-items:center; padding:0 16px; background:#161b22; border-bottom:1px solid #30363d; font-size:14px;">
            { (*status).clone() }
        </div>
        <canvas ref={canvas_ref} style="display:block; touch-action:none;" />
        <ControlsPanel
            placed={scene.placed}
            on_remove={on_remove}
            on_toggle_info={on_toggle_info}
            on_open_settings={open_settings}
            to_picker={props.to_picker.clone()}
        />
        { if scene.show_info {
            if let Some(model) = scene.selected_model() {
                let scene = props.scene.clone();
                html!{ <InfoPanel
                    model={model.clone()}
                    on_close={Callback::from(move |_| scene.dispatch(SceneAction::SetShowInfo(false)))}
                /> }
            } else {
                html!{}
            }
        } else {
            html!{}
        } }
        <SettingsModal
            show={*show_settings}
            config={props.config}
            on_close={close_settings}
            on_change={props.on_config_change.clone()}
        />
    </div>}
}
