//! Time-to-live component for automatic entity despawning.
//!
//! The [`Ttl`] component counts down host ticks. When the remaining count
//! reaches zero, the entity is despawned. There is no callback; it's a "fire
//! and forget" mechanism used for every dropped item.
//!
//! # How It Works
//!
//! 1. Entity is spawned with a `Ttl` holding its lifetime in ticks
//! 2. The `ttl_system` runs once per tick, before anything spawns:
//!    - Decrements the remaining count by one
//!    - When it hits zero, despawns the entity
//!
//! An item spawned during tick `T` with `Ttl::new(20)` is therefore removed
//! during tick `T + 20`, whatever the spawning job does afterwards.
//!
//! # Related
//!
//! - [`crate::systems::ttl::ttl_system`] – system that updates and despawns entities

use bevy_ecs::prelude::Component;

/// Lifetime of a dropped item, in ticks.
pub const ITEM_LIFETIME_TICKS: u32 = 20;

/// Time-to-live component that automatically despawns entities after a number of ticks.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ttl {
    /// Remaining ticks before despawn.
    pub remaining: u32,
}

impl Ttl {
    /// Create a new Ttl with the given lifetime in ticks.
    pub fn new(ticks: u32) -> Self {
        Ttl { remaining: ticks }
    }
}
