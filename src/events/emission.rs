//! Emission job lifecycle events.
//!
//! When an [`EmissionJob`](crate::components::emissionjob::EmissionJob)
//! terminates, an [`EmissionFinished`] event is triggered after the job entity
//! has been scheduled for despawn. [`observe_emission_finished`] logs it and
//! keeps the statistics; hosts can add their own observers.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actor::ActorId;
use crate::components::emissionjob::FinishReason;
use crate::kind::ReliefKind;
use crate::resources::stats::ReliefStats;

/// A job reached its terminal state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionFinished {
    /// The (now despawned) job entity.
    pub job: Entity,
    pub actor: ActorId,
    pub kind: ReliefKind,
    /// Items emitted over the job's life.
    pub fired: u32,
    pub reason: FinishReason,
}

/// Global observer that logs finished jobs and counts them.
pub fn observe_emission_finished(trigger: On<EmissionFinished>, stats: Option<ResMut<ReliefStats>>) {
    let event = trigger.event();
    debug!(
        "{} job {:?} for actor {} finished after {} items ({:?})",
        event.kind, event.job, event.actor, event.fired, event.reason
    );
    if let Some(mut stats) = stats {
        stats.jobs_finished += 1;
        if event.reason == FinishReason::ActorUnavailable {
            stats.jobs_interrupted += 1;
        }
    }
}
