//! AR camera state: screen-point to world-ray casting and the projection
//! used by the canvas overlay.
//!
//! Conventions: screen space is y-down with the origin at the top left, the
//! camera looks along its local -Z, world up is +Y, and model forward is
//! local +Z.

use glam::{Quat, Vec2, Vec3};

use super::collide::Ray;
use crate::model::Pose;

#[derive(Clone, Copy, Debug)]
pub struct ArCamera {
    pub pose: Pose,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
}

impl ArCamera {
    pub fn new(pose: Pose, fov_y: f32, viewport: Vec2) -> Self {
        Self {
            pose,
            fov_y,
            viewport,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.pose.rotation * Vec3::NEG_Z
    }

    pub fn viewport_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Camera forward projected onto the horizontal plane, normalized.
    /// `None` when the camera looks straight up or down.
    pub fn horizontal_bearing(&self) -> Option<Vec3> {
        let f = self.forward();
        let flat = Vec3::new(f.x, 0.0, f.z);
        (flat.length_squared() > 1e-8).then(|| flat.normalize())
    }

    /// Ray from the camera origin through a screen point.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc_x = (screen.x / self.viewport.x) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen.y / self.viewport.y) * 2.0;
        let tan_half = (self.fov_y * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let dir_local = Vec3::new(ndc_x * tan_half * aspect, ndc_y * tan_half, -1.0);
        Ray::new(self.pose.position, self.pose.rotation * dir_local)
    }

    /// Project a world point to screen coordinates. `None` when the point
    /// is at or behind the near plane.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.pose.rotation.conjugate() * (point - self.pose.position);
        if local.z > -1e-4 {
            return None;
        }
        let tan_half = (self.fov_y * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let ndc_x = local.x / (-local.z * tan_half * aspect);
        let ndc_y = local.y / (-local.z * tan_half);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }
}

/// Yaw-only orientation whose local +Z points along `bearing` (horizontal
/// component). Applied to placement poses so objects face the camera's
/// viewing direction without inheriting its pitch.
pub fn yaw_facing(bearing: Vec3) -> Quat {
    Quat::from_rotation_y(bearing.x.atan2(bearing.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    fn test_camera() -> ArCamera {
        ArCamera::new(
            Pose::from_position(Vec3::new(0.0, 1.5, 3.0)),
            FRAC_PI_3,
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn center_ray_follows_forward() {
        let cam = test_camera();
        let ray = cam.screen_ray(cam.viewport_center());
        assert!((ray.dir - cam.forward()).length() < 1e-4);
    }

    #[test]
    fn screen_ray_roundtrips_through_projection() {
        let cam = test_camera();
        let screen = Vec2::new(213.0, 457.0);
        let ray = cam.screen_ray(screen);
        let back = cam.world_to_screen(ray.at(4.0)).unwrap();
        assert!((back - screen).length() < 0.05);
    }

    #[test]
    fn point_behind_camera_does_not_project() {
        let cam = test_camera();
        assert!(cam.world_to_screen(Vec3::new(0.0, 1.5, 10.0)).is_none());
    }

    #[test]
    fn bearing_strips_pitch_and_degenerates_looking_down() {
        let mut cam = test_camera();
        cam.pose.rotation = Quat::from_rotation_x(-0.4);
        let bearing = cam.horizontal_bearing().unwrap();
        assert!(bearing.y.abs() < 1e-6);
        assert!((bearing.length() - 1.0).abs() < 1e-5);

        cam.pose.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        assert!(cam.horizontal_bearing().is_none());
    }

    #[test]
    fn yaw_facing_points_model_forward_along_bearing() {
        let q = yaw_facing(Vec3::new(1.0, 0.0, 0.0));
        let fwd = q * Vec3::Z;
        assert!((fwd - Vec3::X).length() < 1e-5);
        assert!((yaw_facing(Vec3::Z) * Vec3::Z - Vec3::Z).length() < 1e-5);
    }
}
