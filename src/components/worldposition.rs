use bevy_ecs::prelude::Component;

use crate::math::Vec3;

/// World-space position of an entity (feet position for actors).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldPosition {
    pub pos: Vec3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        WorldPosition {
            pos: Vec3::new(x, y, z),
        }
    }
}
