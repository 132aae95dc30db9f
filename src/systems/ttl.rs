//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that counts down TTL ticks and
//! despawns entities when their time runs out.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. `ttl_system` iterates all entities with [`Ttl`](crate::components::ttl::Ttl)
//! 2. Decrements `remaining` by one
//! 3. When `remaining` reaches zero, despawns the entity and counts it in
//!    `items_removed`, unless something else already removed it
//!
//! It must run before anything spawns items in the same tick, otherwise a
//! fresh item would lose one tick of its lifetime.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::stats::ReliefStats;

/// Decrements TTL and despawns entities when it reaches zero.
pub fn ttl_system(
    mut query: Query<(Entity, &mut Ttl)>,
    mut stats: ResMut<ReliefStats>,
    mut commands: Commands,
) {
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining = ttl.remaining.saturating_sub(1);
        if ttl.remaining == 0 {
            commands.queue(move |world: &mut World| {
                let Ok(item) = world.get_entity_mut(entity) else {
                    return;
                };
                item.despawn();
                world.resource_mut::<ReliefStats>().items_removed += 1;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(ReliefStats::default());
        world
    }

    fn host_despawn_system(query: Query<Entity, With<Ttl>>, mut commands: Commands) {
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
        }
    }

    #[test]
    fn test_expired_entity_is_removed_and_counted() {
        let mut world = make_world();
        let entity = world.spawn(Ttl::new(2)).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(ttl_system);

        schedule.run(&mut world);
        assert!(world.get_entity(entity).is_ok());
        schedule.run(&mut world);
        assert!(world.get_entity(entity).is_err());
        assert_eq!(world.resource::<ReliefStats>().items_removed, 1);
    }

    #[test]
    fn test_entity_removed_elsewhere_is_not_counted() {
        let mut world = make_world();
        let entity = world.spawn(Ttl::new(1)).id();
        let mut schedule = Schedule::default();
        schedule.add_systems((host_despawn_system, ttl_system).chain_ignore_deferred());

        schedule.run(&mut world);
        assert!(world.get_entity(entity).is_err());
        assert_eq!(world.resource::<ReliefStats>().items_removed, 0);
    }
}
