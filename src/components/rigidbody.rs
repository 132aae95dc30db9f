//! Velocity handed to the host for spawned items.
//!
//! The [`RigidBody`] component only stores the initial velocity chosen at
//! spawn time. Integrating it (gravity, drag, collisions) is the host world's
//! job; nothing in this crate moves entities.

use bevy_ecs::prelude::Component;

use crate::math::Vec3;

/// Kinematic body storing a velocity in world units per tick.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec3,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(velocity: Vec3) -> Self {
        RigidBody { velocity }
    }
}
