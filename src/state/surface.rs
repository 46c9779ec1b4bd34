//! Surface detection boundary. The host AR runtime is modeled as a
//! `SurfaceProbe`: a synchronous function from a screen point to an optional
//! pose on a detected surface. The web shell feeds it with a `PlaneField`
//! of tracked horizontal plane patches.

use glam::{Quat, Vec2, Vec3};

use super::camera::ArCamera;
use crate::model::Pose;

pub trait SurfaceProbe {
    /// `Some(pose)` when a tracked surface exists under the screen point.
    /// Returns the surface pose with an identity (up-aligned) orientation;
    /// callers that want a camera-facing yaw apply it themselves.
    fn try_get_surface_pose(&self, screen: Vec2) -> Option<Pose>;
}

/// Closures stand in for the AR runtime in tests.
impl<F> SurfaceProbe for F
where
    F: Fn(Vec2) -> Option<Pose>,
{
    fn try_get_surface_pose(&self, screen: Vec2) -> Option<Pose> {
        self(screen)
    }
}

/// An axis-aligned horizontal plane patch at `center.y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedPlane {
    pub center: Vec3,
    pub half_extents: Vec2,
}

impl TrackedPlane {
    pub fn contains(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.half_extents.x
            && (point.z - self.center.z).abs() <= self.half_extents.y
    }
}

/// The set of currently tracked planes. Ray casts return the nearest
/// in-bounds intersection.
#[derive(Clone, Debug, Default)]
pub struct PlaneField {
    pub planes: Vec<TrackedPlane>,
}

impl PlaneField {
    pub fn raycast(&self, camera: &ArCamera, screen: Vec2) -> Option<Pose> {
        let ray = camera.screen_ray(screen);
        let mut best: Option<(f32, Vec3)> = None;
        for plane in &self.planes {
            if ray.dir.y.abs() < 1e-6 {
                continue;
            }
            let t = (plane.center.y - ray.origin.y) / ray.dir.y;
            if t <= 1e-4 {
                continue;
            }
            let point = ray.at(t);
            if !plane.contains(point) {
                continue;
            }
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, point));
            }
        }
        best.map(|(_, point)| Pose::new(point, Quat::IDENTITY))
    }

    /// Simulated tracking acquisition for the web shell: every patch grows
    /// toward `target` so the first seconds of a session exercise the
    /// "no valid pose yet" state.
    pub fn grow(&mut self, dt: f32, rate: f32, target: Vec2) {
        for plane in &mut self.planes {
            plane.half_extents = (plane.half_extents + Vec2::splat(rate * dt)).min(target);
        }
    }
}

/// Binds a plane field to the current frame's camera so it can be handed to
/// the engine as a plain `SurfaceProbe`.
pub struct CameraProbe<'a> {
    pub planes: &'a PlaneField,
    pub camera: &'a ArCamera,
}

impl SurfaceProbe for CameraProbe<'_> {
    fn try_get_surface_pose(&self, screen: Vec2) -> Option<Pose> {
        self.planes.raycast(self.camera, screen)
    }
}
