//! Marker for items spawned by an emission job.
//!
//! A dropped item is spawned as the bundle
//! `(DroppedItem, ItemStack, WorldPosition, RigidBody, Ttl)` and lives for
//! [`ITEM_LIFETIME_TICKS`](crate::components::ttl::ITEM_LIFETIME_TICKS).

use bevy_ecs::prelude::*;

use crate::components::actor::ActorId;
use crate::kind::ReliefKind;

/// Cosmetic item emitted for an actor.
#[derive(Component, Clone, Copy, Debug)]
pub struct DroppedItem {
    pub kind: ReliefKind,
    /// Actor the item was emitted for.
    pub owner: ActorId,
    /// Tick during which the item was spawned.
    pub spawned_tick: u64,
}
