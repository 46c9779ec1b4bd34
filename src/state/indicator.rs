//! Placement indicator presentation: a slow yaw spin plus a sinusoidal
//! scale pulse, both pure functions of elapsed session time sampled once
//! per tick.

use glam::Quat;

use crate::model::Pose;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    /// Spin rate, degrees per second.
    pub spin_dps: f32,
    /// Pulse frequency factor, radians per second.
    pub pulse_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            spin_dps: 50.0,
            pulse_speed: 1.0,
            min_scale: 0.9,
            max_scale: 1.1,
        }
    }
}

/// Candidate pose with the spin applied on top of its camera-facing yaw.
pub fn indicator_pose(candidate: &Pose, elapsed_secs: f32, style: &IndicatorStyle) -> Pose {
    let spin = Quat::from_rotation_y((style.spin_dps * elapsed_secs).to_radians());
    Pose::new(candidate.position, spin * candidate.rotation)
}

/// Uniform pulse scale in `[min_scale, max_scale]`.
pub fn indicator_scale(elapsed_secs: f32, style: &IndicatorStyle) -> f32 {
    let s = ((elapsed_secs * style.pulse_speed).sin() + 1.0) * 0.5;
    style.min_scale + (style.max_scale - style.min_scale) * s
}
