//! Surface placement: maintains the per-tick candidate pose and owns the
//! single placed object.
//!
//! The candidate is probed at the viewport center every tick (reticle
//! model). Commit destroys any prior object before spawning the new one, so
//! at most one object is ever live.

use glam::Vec3;
use thiserror::Error;

use super::camera::{yaw_facing, ArCamera};
use super::collide::ColliderNode;
use super::surface::SurfaceProbe;
use crate::model::{ModelInfo, Pose, ScaleBounds};

/// Handle to the one externally owned spatial entity. Created and destroyed
/// by `PlacementController`; pose and scale are mutated by the gesture
/// layer only.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    pub model_key: String,
    pub pose: Pose,
    pub scale: Vec3,
    /// Scale at creation time; scale bounds are relative to this.
    pub initial_scale: Vec3,
    pub colliders: Vec<ColliderNode>,
}

impl PlacedObject {
    fn spawn(info: &ModelInfo, model_key: String, pose: Pose) -> Self {
        let r = info.collider_radius;
        let h = info.collider_height;
        // Body box plus a "head" child node; hitting either counts as
        // hitting the object.
        let colliders = vec![
            ColliderNode::aabb("body", Vec3::new(0.0, h * 0.5, 0.0), Vec3::new(r, h * 0.5, r)),
            ColliderNode::sphere("head", Vec3::new(0.0, h * 0.85, r * 0.8), r * 0.45),
        ];
        Self {
            model_key,
            pose,
            scale: Vec3::ONE,
            initial_scale: Vec3::ONE,
            colliders,
        }
    }

    /// Incremental yaw about the world vertical axis, degrees.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.pose.rotation =
            glam::Quat::from_rotation_y(degrees.to_radians()) * self.pose.rotation;
    }

    /// Set the scale, clamped per axis against the creation-time scale.
    pub fn set_scale_clamped(&mut self, candidate: Vec3, bounds: &ScaleBounds) {
        self.scale = bounds.clamp_vec(self.initial_scale, candidate);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no valid surface pose this tick")]
    NoValidPose,
    #[error("no model selected")]
    NoSelection,
    #[error("selected model has no asset reference")]
    MissingModel,
}

/// Two-state machine: no object placed / object placed.
#[derive(Debug, Default)]
pub struct PlacementController {
    candidate: Option<Pose>,
    placed: Option<PlacedObject>,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the candidate pose from the probe at the viewport center,
    /// turning the surface orientation into a camera-facing yaw. Runs every
    /// tick, before any input handling.
    pub fn refresh(&mut self, camera: &ArCamera, probe: &impl SurfaceProbe) {
        self.candidate = probe
            .try_get_surface_pose(camera.viewport_center())
            .map(|mut pose| {
                if let Some(bearing) = camera.horizontal_bearing() {
                    pose.rotation = yaw_facing(bearing);
                }
                pose
            });
    }

    pub fn candidate(&self) -> Option<Pose> {
        self.candidate
    }

    pub fn candidate_valid(&self) -> bool {
        self.candidate.is_some()
    }

    /// The indicator shows exactly when a candidate exists and nothing is
    /// placed yet. Pure function of state, recomputed per tick.
    pub fn indicator_visible(&self) -> bool {
        self.candidate.is_some() && self.placed.is_none()
    }

    /// Commit a placement at the current candidate pose. Any existing
    /// object is destroyed first. Errors are configuration or tracking
    /// conditions, never faults.
    pub fn place_or_move(
        &mut self,
        selection: Option<&ModelInfo>,
    ) -> Result<&PlacedObject, PlacementError> {
        let pose = self.candidate.ok_or(PlacementError::NoValidPose)?;
        let info = selection.ok_or(PlacementError::NoSelection)?;
        let key = info
            .model_key
            .clone()
            .ok_or(PlacementError::MissingModel)?;
        Ok(self.placed.insert(PlacedObject::spawn(info, key, pose)))
    }

    /// Destroy the placed object if present. Idempotent; returns whether an
    /// object was removed.
    pub fn remove(&mut self) -> bool {
        self.placed.take().is_some()
    }

    pub fn placed(&self) -> Option<&PlacedObject> {
        self.placed.as_ref()
    }

    pub fn placed_mut(&mut self) -> Option<&mut PlacedObject> {
        self.placed.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};
    use std::f32::consts::FRAC_PI_3;

    fn tilted_camera() -> ArCamera {
        // Above and behind the origin, pitched down so the center ray lands
        // near the origin on the floor plane.
        ArCamera::new(
            Pose::new(Vec3::new(0.0, 1.5, 2.0), Quat::from_rotation_x(-0.6435)),
            FRAC_PI_3,
            Vec2::new(800.0, 600.0),
        )
    }

    fn lion() -> ModelInfo {
        crate::model::default_catalog().remove(1)
    }

    fn fixed_probe(position: Vec3) -> impl Fn(Vec2) -> Option<Pose> {
        move |_| Some(Pose::from_position(position))
    }

    #[test]
    fn commit_places_object_at_candidate() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        assert!(pc.candidate_valid());
        let obj = pc.place_or_move(Some(&lion())).unwrap();
        assert_eq!(obj.pose.position, Vec3::ZERO);
        assert!(pc.placed().is_some());
    }

    #[test]
    fn recommit_replaces_the_single_object() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        pc.place_or_move(Some(&lion())).unwrap();

        pc.refresh(&cam, &fixed_probe(Vec3::new(1.0, 0.0, -2.0)));
        let obj = pc.place_or_move(Some(&lion())).unwrap();
        assert_eq!(obj.pose.position, Vec3::new(1.0, 0.0, -2.0));
        // Still exactly one object: the old pose is gone.
        assert_eq!(
            pc.placed().unwrap().pose.position,
            Vec3::new(1.0, 0.0, -2.0)
        );
    }

    #[test]
    fn commit_without_selection_is_a_logged_noop() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        assert_eq!(pc.place_or_move(None), Err(PlacementError::NoSelection));
        assert!(pc.placed().is_none());
    }

    #[test]
    fn commit_with_missing_asset_reference_fails_softly() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        let mut broken = lion();
        broken.model_key = None;
        assert_eq!(
            pc.place_or_move(Some(&broken)),
            Err(PlacementError::MissingModel)
        );
        assert!(pc.placed().is_none());
    }

    #[test]
    fn commit_without_candidate_reports_no_valid_pose() {
        let mut pc = PlacementController::new();
        let cam = tilted_camera();
        pc.refresh(&cam, &|_| None);
        assert_eq!(
            pc.place_or_move(Some(&lion())),
            Err(PlacementError::NoValidPose)
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        pc.place_or_move(Some(&lion())).unwrap();
        assert!(pc.remove());
        assert!(!pc.remove());
        assert!(pc.placed().is_none());
    }

    #[test]
    fn indicator_tracks_candidate_and_placement_state() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        assert!(!pc.indicator_visible());
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        assert!(pc.indicator_visible());
        pc.place_or_move(Some(&lion())).unwrap();
        assert!(!pc.indicator_visible());
        // Tracking loss while placed: still suppressed, and no stale cache.
        pc.refresh(&cam, &|_| None);
        assert!(!pc.indicator_visible());
        assert!(!pc.candidate_valid());
    }

    #[test]
    fn candidate_faces_the_camera_without_pitch() {
        let cam = tilted_camera();
        let mut pc = PlacementController::new();
        pc.refresh(&cam, &fixed_probe(Vec3::ZERO));
        let rot = pc.candidate().unwrap().rotation;
        let fwd = rot * Vec3::Z;
        // Camera looks toward -Z; the object's forward must match the
        // horizontal bearing exactly, with no vertical component.
        assert!(fwd.y.abs() < 1e-5);
        assert!((fwd - Vec3::NEG_Z).length() < 1e-4);
    }
}
