//! Emission job system.
//!
//! This system advances every [`EmissionJob`] by one tick and spawns the
//! dropped items of the jobs that fire.
//!
//! # Behavior
//!
//! - The owning actor is looked up every tick; a missing entity or an offline
//!   actor counts as unavailable
//! - Position and facing are read at firing time, so the stream follows the
//!   actor
//! - Items are built through the [`MaterialRegistry`]; a failure is logged and
//!   the fallback material is used instead, the job keeps running
//! - A terminated job is despawned and an [`EmissionFinished`] event is triggered

use bevy_ecs::prelude::*;
use log::error;

use crate::components::actor::Actor;
use crate::components::droppeditem::DroppedItem;
use crate::components::emissionjob::{EmissionJob, JobTick};
use crate::components::facing::Facing;
use crate::components::rigidbody::RigidBody;
use crate::components::ttl::{ITEM_LIFETIME_TICKS, Ttl};
use crate::components::worldposition::WorldPosition;
use crate::events::emission::EmissionFinished;
use crate::resources::materials::MaterialRegistry;
use crate::resources::stats::ReliefStats;
use crate::resources::tickclock::TickClock;

/// Advances all emission jobs by one tick.
///
/// # Ordering
///
/// Should run **after** `ttl_system` so an item spawned here keeps its full lifetime.
pub fn emission_system(
    tick: Res<TickClock>,
    registry: Res<MaterialRegistry>,
    mut jobs: Query<(Entity, &mut EmissionJob)>,
    actors: Query<(&Actor, &WorldPosition, &Facing)>,
    mut stats: ResMut<ReliefStats>,
    mut commands: Commands,
) {
    for (job_entity, mut job) in jobs.iter_mut() {
        let actor = actors
            .get(job.owner)
            .ok()
            .filter(|(actor, _, _)| actor.is_available());

        match job.advance(actor.is_some()) {
            JobTick::Idle | JobTick::Done => {}
            JobTick::Fire => {
                let Some((_, position, facing)) = actor else {
                    continue;
                };
                let (spawn_pos, velocity) = job.profile.spawn_geometry(position.pos, facing.dir);
                let stack = match registry.create_item(&job.material) {
                    Ok(stack) => stack,
                    Err(e) => {
                        error!("Failed to create item: {}", e);
                        stats.spawn_fallbacks += 1;
                        registry.fallback_item()
                    }
                };
                commands.spawn((
                    DroppedItem {
                        kind: job.kind,
                        owner: job.actor,
                        spawned_tick: tick.tick,
                    },
                    stack,
                    WorldPosition { pos: spawn_pos },
                    RigidBody::with_velocity(velocity),
                    Ttl::new(ITEM_LIFETIME_TICKS),
                ));
                stats.items_spawned += 1;
            }
            JobTick::Terminate(reason) => {
                commands.entity(job_entity).despawn();
                commands.trigger(EmissionFinished {
                    job: job_entity,
                    actor: job.actor,
                    kind: job.kind,
                    fired: job.fired,
                    reason,
                });
            }
        }
    }
}
