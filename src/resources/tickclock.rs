//! Host tick counter and tick rate.
//!
//! One run of the schedule is one host tick. Everything inside the crate that
//! counts time for emission and item lifetimes counts ticks; only the host
//! loop needs [`ticks_to_duration`] to pace itself against the wall clock.

use bevy_ecs::prelude::Resource;
use std::time::Duration;

/// Tick rate of the reference host.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Number of the tick currently being processed.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct TickClock {
    pub tick: u64,
}

/// Host simulation rate.
#[derive(Resource, Clone, Copy, Debug)]
pub struct TickRate {
    pub ticks_per_second: u32,
}

impl Default for TickRate {
    fn default() -> Self {
        TickRate {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

impl TickRate {
    pub fn new(ticks_per_second: u32) -> Self {
        TickRate {
            ticks_per_second: ticks_per_second.max(1),
        }
    }

    /// Wall-clock length of a single tick.
    pub fn tick_duration(&self) -> Duration {
        ticks_to_duration(1, self.ticks_per_second)
    }
}

/// Wall-clock duration of `ticks` at `ticks_per_second`.
pub fn ticks_to_duration(ticks: u64, ticks_per_second: u32) -> Duration {
    let tps = u64::from(ticks_per_second.max(1));
    Duration::from_nanos(ticks.saturating_mul(1_000_000_000) / tps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_to_duration_at_default_rate() {
        assert_eq!(ticks_to_duration(20, 20), Duration::from_secs(1));
        assert_eq!(ticks_to_duration(2, 20), Duration::from_millis(100));
        assert_eq!(ticks_to_duration(0, 20), Duration::ZERO);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        assert_eq!(ticks_to_duration(3, 0), Duration::from_secs(3));
        assert_eq!(TickRate::new(0).ticks_per_second, 1);
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(TickRate::default().tick_duration(), Duration::from_millis(50));
    }
}
