//! Ray/collider intersection primitives used by hit testing and the
//! surface probe.

use glam::{Quat, Vec3};

const EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Aabb { half_extents: Vec3 },
}

/// One collider in an object's hierarchy, expressed in the object's local
/// space. A touch on any node counts as a touch on the owning object.
#[derive(Clone, Debug, PartialEq)]
pub struct ColliderNode {
    pub name: &'static str,
    pub offset: Vec3,
    pub shape: ColliderShape,
}

impl ColliderNode {
    pub fn sphere(name: &'static str, offset: Vec3, radius: f32) -> Self {
        Self {
            name,
            offset,
            shape: ColliderShape::Sphere { radius },
        }
    }

    pub fn aabb(name: &'static str, offset: Vec3, half_extents: Vec3) -> Self {
        Self {
            name,
            offset,
            shape: ColliderShape::Aabb { half_extents },
        }
    }

    /// Intersect a world-space ray against this collider under the given
    /// world pose and (possibly non-uniform) scale. The ray is taken into
    /// local space, intersected there, and the hit mapped back, so ordering
    /// between colliders is done on world-space hit points.
    pub fn intersect_world(
        &self,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        ray: &Ray,
    ) -> Option<Vec3> {
        if scale.x.abs() < EPS || scale.y.abs() < EPS || scale.z.abs() < EPS {
            return None;
        }
        let inv_rot = rotation.conjugate();
        let local_origin = (inv_rot * (ray.origin - position)) / scale;
        let local_dir = (inv_rot * ray.dir) / scale;
        let len = local_dir.length();
        if len < EPS {
            return None;
        }
        let local_dir = local_dir / len;
        let t = match self.shape {
            ColliderShape::Sphere { radius } => {
                ray_sphere(local_origin, local_dir, self.offset, radius)
            }
            ColliderShape::Aabb { half_extents } => ray_aabb(
                local_origin,
                local_dir,
                self.offset - half_extents,
                self.offset + half_extents,
            ),
        }?;
        let local_hit = local_origin + local_dir * t;
        Some(position + rotation * (local_hit * scale))
    }
}

/// Closest forward intersection of a ray with a sphere, if any.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_d = disc.sqrt();
    let t = -b - sqrt_d;
    if t >= EPS {
        return Some(t);
    }
    let t = -b + sqrt_d;
    (t >= EPS).then_some(t)
}

/// Slab-method ray/box intersection. Returns the closest forward hit.
pub fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() < EPS {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    if t_far < EPS {
        return None;
    }
    Some(if t_near >= EPS { t_near } else { t_far })
}
