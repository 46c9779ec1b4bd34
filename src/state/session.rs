//! Per-tick orchestration. `ArSession` runs the engine once per rendered
//! frame: refresh the placement candidate first, then route touch input to
//! either tap-to-place (no object yet) or the gesture controller (object
//! placed). The two never mutate the object in the same tick.

use glam::Vec2;

use super::camera::ArCamera;
use super::contacts::{Contact, ContactPhase};
use super::gesture::{GestureController, GestureEvent};
use super::placement::{PlacementController, PlacementError};
use super::surface::SurfaceProbe;
use crate::model::{InteractionConfig, ModelInfo};

/// UI hit-test boundary: a touch over a UI control is not processed by the
/// engine at all that tick.
pub trait UiOverlay {
    fn is_over_ui(&self, screen: Vec2) -> bool;
}

impl<F> UiOverlay for F
where
    F: Fn(Vec2) -> bool,
{
    fn is_over_ui(&self, screen: Vec2) -> bool {
        self(screen)
    }
}

/// Screen-space rectangles covering the DOM panels overlaying the canvas.
#[derive(Clone, Debug, Default)]
pub struct UiRegions {
    pub rects: Vec<(Vec2, Vec2)>,
}

impl UiOverlay for UiRegions {
    fn is_over_ui(&self, p: Vec2) -> bool {
        self.rects
            .iter()
            .any(|(min, max)| p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y)
    }
}

/// Notifications for the UI layer, emitted by `tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    PlacementCommitted,
    PlacementRemoved,
    PlacementFailed(PlacementError),
    DragStarted,
    DragEnded,
}

#[derive(Default)]
pub struct ArSession {
    pub placement: PlacementController,
    pub gesture: GestureController,
    elapsed_secs: f32,
}

impl ArSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    /// One engine tick. The candidate pose refresh always happens before
    /// any input handling, so gesture math never sees a stale candidate.
    pub fn tick(
        &mut self,
        dt_secs: f32,
        camera: &ArCamera,
        probe: &impl SurfaceProbe,
        ui: &impl UiOverlay,
        contacts: &[Contact],
        selection: Option<&ModelInfo>,
        config: &InteractionConfig,
    ) -> Vec<SceneEvent> {
        self.elapsed_secs += dt_secs.max(0.0);
        self.placement.refresh(camera, probe);

        let mut events = Vec::new();
        match self.placement.placed_mut() {
            None => {
                // Tap-to-place: the first Began contact not over UI.
                let tap = contacts.iter().find(|c| {
                    c.phase == ContactPhase::Began && !ui.is_over_ui(c.position)
                });
                if tap.is_some() && self.placement.candidate_valid() {
                    match self.placement.place_or_move(selection) {
                        Ok(_) => events.push(SceneEvent::PlacementCommitted),
                        Err(err) => events.push(SceneEvent::PlacementFailed(err)),
                    }
                }
            }
            Some(object) => {
                for ev in self
                    .gesture
                    .handle_contacts(contacts, object, camera, probe, ui, config)
                {
                    events.push(match ev {
                        GestureEvent::DragStarted => SceneEvent::DragStarted,
                        GestureEvent::DragEnded => SceneEvent::DragEnded,
                    });
                }
            }
        }
        events
    }

    /// Explicit removal (UI button). Idempotent.
    pub fn remove_object(&mut self) -> Vec<SceneEvent> {
        self.gesture.reset();
        if self.placement.remove() {
            vec![SceneEvent::PlacementRemoved]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_catalog, Pose};
    use glam::{Quat, Vec3};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn overhead_camera() -> ArCamera {
        ArCamera::new(
            Pose::new(Vec3::new(0.0, 4.0, 0.0), Quat::from_rotation_x(-FRAC_PI_2)),
            FRAC_PI_3,
            Vec2::new(800.0, 600.0),
        )
    }

    fn floor_probe(screen: Vec2) -> Option<Pose> {
        Some(Pose::from_position(Vec3::new(
            (screen.x - 400.0) / 100.0,
            0.0,
            (screen.y - 300.0) / 100.0,
        )))
    }

    fn no_ui(_: Vec2) -> bool {
        false
    }

    fn tap(position: Vec2) -> Contact {
        Contact {
            id: 0,
            position,
            delta: Vec2::ZERO,
            phase: ContactPhase::Began,
        }
    }

    #[test]
    fn tap_places_then_gestures_take_over() {
        let cam = overhead_camera();
        let catalog = default_catalog();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();

        let events = session.tick(
            0.016,
            &cam,
            &floor_probe,
            &no_ui,
            &[tap(CENTER)],
            Some(&catalog[0]),
            &cfg,
        );
        assert_eq!(events, vec![SceneEvent::PlacementCommitted]);
        assert!(session.placement.placed().is_some());

        // Object exists: the same tap now arms a drag instead of replacing
        // the placement.
        let events = session.tick(
            0.016,
            &cam,
            &floor_probe,
            &no_ui,
            &[tap(CENTER)],
            Some(&catalog[0]),
            &cfg,
        );
        assert_eq!(events, vec![SceneEvent::DragStarted]);
    }

    #[test]
    fn tap_without_selection_fails_softly() {
        let cam = overhead_camera();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();
        let events = session.tick(
            0.016,
            &cam,
            &floor_probe,
            &no_ui,
            &[tap(CENTER)],
            None,
            &cfg,
        );
        assert_eq!(
            events,
            vec![SceneEvent::PlacementFailed(PlacementError::NoSelection)]
        );
        assert!(session.placement.placed().is_none());
    }

    #[test]
    fn tap_without_surface_does_nothing() {
        let cam = overhead_camera();
        let catalog = default_catalog();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();
        let events = session.tick(
            0.016,
            &cam,
            &|_| None,
            &no_ui,
            &[tap(CENTER)],
            Some(&catalog[0]),
            &cfg,
        );
        assert!(events.is_empty());
        assert!(session.placement.placed().is_none());
    }

    #[test]
    fn tap_over_ui_never_places() {
        let cam = overhead_camera();
        let catalog = default_catalog();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();
        let regions = UiRegions {
            rects: vec![(Vec2::ZERO, Vec2::new(800.0, 600.0))],
        };
        let events = session.tick(
            0.016,
            &cam,
            &floor_probe,
            &regions,
            &[tap(CENTER)],
            Some(&catalog[0]),
            &cfg,
        );
        assert!(events.is_empty());
        assert!(session.placement.placed().is_none());
    }

    #[test]
    fn remove_resets_and_is_idempotent() {
        let cam = overhead_camera();
        let catalog = default_catalog();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();
        session.tick(
            0.016,
            &cam,
            &floor_probe,
            &no_ui,
            &[tap(CENTER)],
            Some(&catalog[0]),
            &cfg,
        );
        assert_eq!(session.remove_object(), vec![SceneEvent::PlacementRemoved]);
        assert!(session.remove_object().is_empty());
        // Back in the no-object state: the indicator returns with tracking.
        session.tick(0.016, &cam, &floor_probe, &no_ui, &[], None, &cfg);
        assert!(session.placement.indicator_visible());
    }

    #[test]
    fn ui_regions_contain_points_inclusively() {
        let regions = UiRegions {
            rects: vec![(Vec2::new(0.0, 0.0), Vec2::new(100.0, 56.0))],
        };
        assert!(regions.is_over_ui(Vec2::new(100.0, 56.0)));
        assert!(!regions.is_over_ui(Vec2::new(100.1, 56.0)));
    }

    #[test]
    fn elapsed_time_accumulates() {
        let cam = overhead_camera();
        let cfg = InteractionConfig::default();
        let mut session = ArSession::new();
        for _ in 0..10 {
            session.tick(0.016, &cam, &floor_probe, &no_ui, &[], None, &cfg);
        }
        assert!((session.elapsed_secs() - 0.16).abs() < 1e-5);
    }
}
