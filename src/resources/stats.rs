use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// Running counters, reported by the simulator.
#[derive(Resource, Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReliefStats {
    /// Commands that passed the cooldown gate and started a job.
    pub activations: u64,
    /// Commands refused because of an active cooldown.
    pub cooldown_denials: u64,
    /// Commands refused because a job of the same kind was still running.
    pub busy_rejections: u64,
    /// Commands from senders that are not actors.
    pub non_actor_rejections: u64,
    /// Commands received while the feature set is disabled.
    pub disabled_rejections: u64,
    pub jobs_finished: u64,
    /// Jobs stopped because their actor went away.
    pub jobs_interrupted: u64,
    pub items_spawned: u64,
    pub items_removed: u64,
    /// Items built from the fallback material after a spawn error.
    pub spawn_fallbacks: u64,
    /// Cooldown entries removed by pruning.
    pub cooldowns_pruned: u64,
}
