//! Fundamental geometric and simulation types.
//!
//! The simulation is top-down: gameplay happens on the 2D ground plane
//! (`Vec2`, x/y) while bounding boxes and render poses live in 3D with
//! y up. A ground position `(x, y)` at `elevation` maps to the 3D point
//! `(x, elevation, y)`.

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Stable handle for a live entity.
///
/// Wraps the engine's slot/generation bits so the host can hold ids without
/// depending on the ECS. A removed slot is reused with a new generation, so a
/// stale id never aliases a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Low 32 bits are the slot index, high 32 the generation.
        write!(f, "E{}g{}", self.0 as u32, self.0 >> 32)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks run so far.
    pub tick: u64,
    /// Host-supplied simulation time of the last tick (seconds).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Record one tick at the given simulation time.
    pub fn advance(&mut self, now: f64) {
        self.tick += 1;
        self.elapsed_secs = now;
    }
}

/// Axis-aligned bounding box in 3D (y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Loose world-space box: all eight corners pushed through `matrix`,
    /// then the componentwise min/max. Conservative under rotation and
    /// non-uniform scale.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in self.corners() {
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }

    /// True when the boxes overlap on all three axes. Touching counts.
    pub fn intersects(&self, other: &Aabb) -> bool {
        interval_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && interval_overlap(self.min.y, self.max.y, other.min.y, other.max.y)
            && interval_overlap(self.min.z, self.max.z, other.min.z, other.max.z)
    }
}

impl Aabb {
    /// True when `point` lies inside the box or on its surface.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

fn interval_overlap(min_a: f32, max_a: f32, min_b: f32, max_b: f32) -> bool {
    !(min_a > max_b || min_b > max_a)
}

/// Rotation that turns local +x onto the 2D facing direction (about world y).
pub fn facing_rotation(facing: Vec2) -> Quat {
    Quat::from_rotation_y(-facing_angle(facing))
}

/// Angle of a facing vector in radians, counter-clockwise from +x.
pub fn facing_angle(facing: Vec2) -> f32 {
    facing.y.atan2(facing.x)
}

/// World matrix for a ground position, elevation, facing and scale.
pub fn world_matrix(position: Vec2, elevation: f32, facing: Vec2, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        scale,
        facing_rotation(facing),
        Vec3::new(position.x, elevation, position.y),
    )
}

/// Exponential turn of `current` toward `target` at `rate` per second.
///
/// Frame-rate independent: each call covers `1 - e^(-rate*dt)` of the angle
/// between the two, so an exactly opposite target still turns. A zero target
/// keeps `current`.
pub fn blend_facing(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    let (Some(from), Some(to)) = (current.try_normalize(), target.try_normalize()) else {
        return current;
    };
    let weight = 1.0 - (-rate * dt).exp();
    let angle = from.perp_dot(to).atan2(from.dot(to));
    Vec2::from_angle(angle * weight).rotate(from)
}

/// Visual pose offset produced by the animator (rotation as Euler degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vec3,
    pub scale: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
        rotation: Vec3::ZERO,
    };

    /// Rotation as a quaternion.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Plain per-component linear interpolation (no easing).
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            translation: self.translation.lerp(other.translation, t),
            scale: self.scale.lerp(other.scale, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }

    /// Stack another pose on top of this one (translations and rotations add,
    /// scales multiply).
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            translation: self.translation + other.translation,
            scale: self.scale * other.scale,
            rotation: self.rotation + other.rotation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
