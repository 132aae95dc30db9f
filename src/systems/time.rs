//! Tick update.
//!
//! Advances the shared [`TickClock`](crate::resources::tickclock::TickClock)
//! once per host tick, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::tickclock::TickClock;

/// Start the next tick. Returns the new tick number.
pub fn advance_tick(world: &mut World) -> u64 {
    let mut clock = world.resource_mut::<TickClock>();
    clock.tick += 1;
    clock.tick
}
