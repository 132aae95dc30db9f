//! Look direction of an actor.
//!
//! The host stores yaw and pitch in degrees. [`Facing::from_yaw_pitch`]
//! converts them with the usual convention: yaw 0 looks towards +Z, yaw 90
//! towards -X, positive pitch looks down.

use bevy_ecs::prelude::Component;

use crate::math::Vec3;

/// Facing direction of an actor. Not necessarily normalized.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Facing {
    pub dir: Vec3,
}

impl Facing {
    pub fn new(dir: Vec3) -> Self {
        Facing { dir }
    }

    /// Build a unit facing from yaw/pitch angles in degrees.
    pub fn from_yaw_pitch(yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let yaw = yaw_degrees.to_radians();
        let pitch = pitch_degrees.to_radians();
        let xz = pitch.cos();
        Facing {
            dir: Vec3::new(-xz * yaw.sin(), -pitch.sin(), xz * yaw.cos()),
        }
    }

    /// Normalized direction; zero if the stored direction is degenerate.
    pub fn unit(&self) -> Vec3 {
        self.dir.normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_yaw_zero_looks_south() {
        let f = Facing::from_yaw_pitch(0.0, 0.0);
        assert!(vec_approx_eq(f.dir, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_yaw_ninety_looks_west() {
        let f = Facing::from_yaw_pitch(90.0, 0.0);
        assert!(vec_approx_eq(f.dir, Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_pitch_ninety_looks_down() {
        let f = Facing::from_yaw_pitch(0.0, 90.0);
        assert!(vec_approx_eq(f.dir, Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_unit_normalizes() {
        let f = Facing::new(Vec3::new(0.0, 0.0, 5.0));
        assert!(vec_approx_eq(f.unit(), Vec3::new(0.0, 0.0, 1.0)));
    }
}
