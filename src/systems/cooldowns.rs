//! Periodic sweep of expired cooldown entries.
//!
//! Disabled unless `cooldowns.prune-interval` is positive. Removing an entry
//! whose cooldown has elapsed does not change any later gate decision.

use bevy_ecs::prelude::*;
use log::debug;

use crate::kind::ReliefKind;
use crate::resources::clock::GameClock;
use crate::resources::cooldowns::CooldownGate;
use crate::resources::reliefconfig::ReliefSettings;
use crate::resources::stats::ReliefStats;
use crate::resources::tickclock::{TickClock, TickRate};

/// Ticks between two sweeps, or `None` when pruning is off.
pub fn prune_period_ticks(interval_seconds: i64, ticks_per_second: u32) -> Option<u64> {
    let seconds = u64::try_from(interval_seconds).ok().filter(|&s| s > 0)?;
    Some(seconds.saturating_mul(u64::from(ticks_per_second.max(1))))
}

/// Runs [`CooldownGate::prune_expired`] for both kinds every `prune-interval` seconds.
pub fn prune_cooldowns_system(
    settings: Option<Res<ReliefSettings>>,
    gate: Res<CooldownGate>,
    clock: Res<GameClock>,
    tick: Res<TickClock>,
    tick_rate: Res<TickRate>,
    mut stats: ResMut<ReliefStats>,
) {
    let Some(settings) = settings else {
        return;
    };
    let Some(every) = prune_period_ticks(settings.prune_interval_seconds, tick_rate.ticks_per_second)
    else {
        return;
    };
    if tick.tick == 0 || tick.tick % every != 0 {
        return;
    }

    let now = clock.now_millis();
    let removed: usize = ReliefKind::ALL
        .iter()
        .map(|&kind| gate.prune_expired(kind, now, settings.kind(kind).cooldown_seconds))
        .sum();
    if removed > 0 {
        debug!("Pruned {} expired cooldown entries", removed);
        stats.cooldowns_pruned += removed as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_period() {
        assert_eq!(prune_period_ticks(0, 20), None);
        assert_eq!(prune_period_ticks(-5, 20), None);
        assert_eq!(prune_period_ticks(3, 20), Some(60));
        assert_eq!(prune_period_ticks(i64::MAX, u32::MAX), Some(u64::MAX));
    }
}
