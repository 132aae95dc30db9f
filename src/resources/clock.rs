//! Wall-clock source used for cooldown timestamps.
//!
//! Cooldowns are measured in real milliseconds, not ticks, so a lagging host
//! does not stretch them. The clock is injected through [`GameClock`] so tests
//! and the simulator can drive time by hand with [`ManualClock`].

use bevy_ecs::prelude::Resource;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Real time from the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        ManualClock {
            millis: AtomicI64::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Clock resource read by the command system.
#[derive(Resource, Clone)]
pub struct GameClock(pub Arc<dyn Clock>);

impl Default for GameClock {
    fn default() -> Self {
        GameClock(Arc::new(SystemClock))
    }
}

impl GameClock {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        GameClock(clock)
    }

    pub fn now_millis(&self) -> i64 {
        self.0.now_millis()
    }
}
