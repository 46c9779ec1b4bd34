//! Gesture interpretation for the placed object: one-contact drag,
//! two-contact rotate+scale. Driven once per tick with that tick's contact
//! frame; all transient gesture state lives here and is re-established at
//! each gesture start.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::camera::ArCamera;
use super::contacts::{Contact, ContactPhase};
use super::hit_test::hit_test;
use super::placement::PlacedObject;
use super::session::UiOverlay;
use super::surface::SurfaceProbe;
use crate::model::InteractionConfig;

/// Pinch baselines below this many pixels are degenerate; scale updates are
/// skipped rather than divided by (near) zero.
pub const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Diagnostic notifications for the UI layer. Not required for
/// correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    DragStarted,
    DragEnded,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Object height above the drag anchor, recorded at drag start and held
    /// constant for the whole drag.
    height_offset: f32,
}

#[derive(Debug, Clone, Copy)]
struct PinchState {
    initial_distance: f32,
    base_scale: Vec3,
}

#[derive(Debug, Default)]
pub struct GestureController {
    drag: Option<DragState>,
    pinch: Option<PinchState>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drop all transient gesture state (object removed or replaced).
    pub fn reset(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    /// Interpret one tick's contact frame against the placed object.
    /// Contacts over UI are not processed at all; contacts beyond the first
    /// two are ignored.
    pub fn handle_contacts(
        &mut self,
        contacts: &[Contact],
        object: &mut PlacedObject,
        camera: &ArCamera,
        probe: &impl SurfaceProbe,
        ui: &impl UiOverlay,
        config: &InteractionConfig,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let active: Vec<&Contact> = contacts
            .iter()
            .filter(|c| !ui.is_over_ui(c.position))
            .collect();

        if active.len() >= 2 {
            // Two contacts preempt a drag in progress.
            if self.drag.take().is_some() {
                events.push(GestureEvent::DragEnded);
            }
            self.handle_two_contacts(active[0], active[1], object, camera, config);
            return events;
        }

        // Below two contacts the pinch baseline is stale; the next
        // two-contact gesture must re-establish it.
        self.pinch = None;

        match active.first() {
            Some(&c) if config.enable_drag => {
                self.handle_single_contact(c, object, camera, probe, &mut events);
            }
            _ => {
                // Drag disabled mid-gesture, or every contact gone/over UI.
                if (active.is_empty() || !config.enable_drag) && self.drag.take().is_some() {
                    events.push(GestureEvent::DragEnded);
                }
            }
        }
        events
    }

    fn handle_single_contact(
        &mut self,
        contact: &Contact,
        object: &mut PlacedObject,
        camera: &ArCamera,
        probe: &impl SurfaceProbe,
        events: &mut Vec<GestureEvent>,
    ) {
        match contact.phase {
            ContactPhase::Began => {
                // Arm only when the contact actually touches the object.
                if let Some(hit) = hit_test(camera, contact.position, object) {
                    let anchor_y = probe
                        .try_get_surface_pose(contact.position)
                        .map(|p| p.position.y)
                        .unwrap_or(hit.y);
                    self.drag = Some(DragState {
                        height_offset: object.pose.position.y - anchor_y,
                    });
                    events.push(GestureEvent::DragStarted);
                }
            }
            ContactPhase::Moved => {
                if let Some(drag) = self.drag {
                    // No surface under the finger this tick: keep the last
                    // valid pose rather than jumping or erroring.
                    if let Some(surface) = probe.try_get_surface_pose(contact.position) {
                        object.pose.position = Vec3::new(
                            surface.position.x,
                            surface.position.y + drag.height_offset,
                            surface.position.z,
                        );
                    }
                }
            }
            ContactPhase::Ended | ContactPhase::Canceled => {
                if self.drag.take().is_some() {
                    events.push(GestureEvent::DragEnded);
                }
            }
        }
    }

    fn handle_two_contacts(
        &mut self,
        c0: &Contact,
        c1: &Contact,
        object: &mut PlacedObject,
        camera: &ArCamera,
        config: &InteractionConfig,
    ) {
        let began =
            c0.phase == ContactPhase::Began || c1.phase == ContactPhase::Began;

        if began || self.pinch.is_none() {
            // Gesture start: at least one contact must be on the object,
            // otherwise two fingers on empty space would spin it.
            self.pinch = None;
            let on_object = hit_test(camera, c0.position, object).is_some()
                || hit_test(camera, c1.position, object).is_some();
            if on_object {
                self.pinch = Some(PinchState {
                    initial_distance: c0.position.distance(c1.position),
                    base_scale: object.scale,
                });
            }
            // Deltas on the start tick are not meaningful yet.
            return;
        }

        let Some(pinch) = self.pinch else { return };
        let moved =
            c0.phase == ContactPhase::Moved || c1.phase == ContactPhase::Moved;
        if !moved {
            return;
        }

        if config.enable_rotation {
            let delta_deg = angle_delta_degrees(c0, c1);
            // Screen-space angles and world yaw are opposite-handed.
            object.rotate_yaw(-delta_deg * config.rotation_speed);
        }

        if config.enable_scale && pinch.initial_distance >= MIN_PINCH_DISTANCE {
            let factor = c0.position.distance(c1.position) / pinch.initial_distance;
            // Factor applies to the gesture-start snapshot, not the current
            // scale, so repeated ticks do not compound error.
            object.set_scale_clamped(pinch.base_scale * factor, &config.scale_bounds);
        }
    }
}

/// Signed change of the contact0→contact1 screen angle over this tick,
/// degrees, wrap-normalized into (-180, 180].
fn angle_delta_degrees(c0: &Contact, c1: &Contact) -> f32 {
    let angle_of = |a: Vec2, b: Vec2| (b.y - a.y).atan2(b.x - a.x);
    let prev = angle_of(c0.position - c0.delta, c1.position - c1.delta);
    let current = angle_of(c0.position, c1.position);
    let mut delta = current - prev;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta.to_degrees()
}
