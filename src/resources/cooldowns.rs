//! Per-actor cooldown tracking.
//!
//! The [`CooldownGate`] decides whether an actor may activate a kind right
//! now. It keeps one [`CooldownStore`] per kind mapping actor id to the
//! timestamp (ms) of the last successful activation.
//!
//! # Arithmetic
//!
//! Both timestamps are truncated to whole seconds before comparing:
//!
//! ```text
//! seconds_left = (last_ms / 1000 + cooldown) - now_ms / 1000
//! ```
//!
//! so an activation at 1999 ms with a 1 s cooldown is allowed again at
//! 2000 ms. Denials never touch the store.
//!
//! # Concurrency
//!
//! The gate is `Clone + Send + Sync` and can be called from command threads
//! directly. [`ShardedCooldownStore`] is a `DashMap`, so different actors
//! rarely contend, and check-and-record for one actor happens under that
//! actor's shard lock.
//!
//! Entries are never evicted unless [`CooldownGate::prune_expired`] is
//! called; an expired entry and a missing one behave identically.

use bevy_ecs::prelude::Resource;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::components::actor::ActorId;
use crate::kind::ReliefKind;

/// Result of an activation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownOutcome {
    /// Recorded; the actor may proceed.
    Allowed,
    /// Still cooling down for this many whole seconds.
    Denied { seconds_left: i64 },
}

/// Storage of last-activation timestamps keyed by actor.
pub trait CooldownStore: Send + Sync {
    fn get(&self, actor: ActorId) -> Option<i64>;

    fn put(&self, actor: ActorId, millis: i64);

    /// Atomic read-modify-write of one entry. `f` sees the current value and
    /// returns the value to store, or `None` to leave the entry unchanged.
    fn update(&self, actor: ActorId, f: &mut dyn FnMut(Option<i64>) -> Option<i64>);

    /// Keep only entries for which `keep` returns true. Returns how many were removed.
    fn retain(&self, keep: &mut dyn FnMut(ActorId, i64) -> bool) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Concurrent in-memory store.
#[derive(Debug, Default)]
pub struct ShardedCooldownStore {
    map: DashMap<ActorId, i64>,
}

impl ShardedCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for ShardedCooldownStore {
    fn get(&self, actor: ActorId) -> Option<i64> {
        self.map.get(&actor).map(|entry| *entry)
    }

    fn put(&self, actor: ActorId, millis: i64) {
        self.map.insert(actor, millis);
    }

    fn update(&self, actor: ActorId, f: &mut dyn FnMut(Option<i64>) -> Option<i64>) {
        match self.map.entry(actor) {
            Entry::Occupied(mut entry) => {
                if let Some(value) = f(Some(*entry.get())) {
                    entry.insert(value);
                }
            }
            Entry::Vacant(entry) => {
                if let Some(value) = f(None) {
                    entry.insert(value);
                }
            }
        }
    }

    fn retain(&self, keep: &mut dyn FnMut(ActorId, i64) -> bool) -> usize {
        let before = self.map.len();
        self.map.retain(|actor, millis| keep(*actor, *millis));
        before.saturating_sub(self.map.len())
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Whole seconds an actor still has to wait; `<= 0` means the cooldown is over.
pub fn seconds_left(last_millis: i64, now_millis: i64, cooldown_seconds: i64) -> i64 {
    (last_millis / 1000)
        .saturating_add(cooldown_seconds)
        .saturating_sub(now_millis / 1000)
}

/// Cooldown check-and-record for both kinds.
#[derive(Resource, Clone)]
pub struct CooldownGate {
    pee: Arc<dyn CooldownStore>,
    poo: Arc<dyn CooldownStore>,
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CooldownGate {
    /// Gate backed by two fresh [`ShardedCooldownStore`]s.
    pub fn new() -> Self {
        Self::with_stores(
            Arc::new(ShardedCooldownStore::new()),
            Arc::new(ShardedCooldownStore::new()),
        )
    }

    pub fn with_stores(pee: Arc<dyn CooldownStore>, poo: Arc<dyn CooldownStore>) -> Self {
        CooldownGate { pee, poo }
    }

    pub fn store(&self, kind: ReliefKind) -> &dyn CooldownStore {
        match kind {
            ReliefKind::Pee => self.pee.as_ref(),
            ReliefKind::Poo => self.poo.as_ref(),
        }
    }

    /// Allow and record `now_millis`, or deny with the remaining wait.
    pub fn try_activate(
        &self,
        actor: ActorId,
        kind: ReliefKind,
        now_millis: i64,
        cooldown_seconds: i64,
    ) -> CooldownOutcome {
        let mut outcome = CooldownOutcome::Allowed;
        self.store(kind).update(actor, &mut |last| {
            if let Some(last) = last {
                let left = seconds_left(last, now_millis, cooldown_seconds);
                if left > 0 {
                    outcome = CooldownOutcome::Denied { seconds_left: left };
                    return None;
                }
            }
            Some(now_millis)
        });
        outcome
    }

    /// Remaining wait without recording anything; `None` if the actor may activate.
    pub fn remaining(
        &self,
        actor: ActorId,
        kind: ReliefKind,
        now_millis: i64,
        cooldown_seconds: i64,
    ) -> Option<i64> {
        let last = self.store(kind).get(actor)?;
        let left = seconds_left(last, now_millis, cooldown_seconds);
        (left > 0).then_some(left)
    }

    /// Drop entries whose cooldown is over. Returns how many were removed.
    pub fn prune_expired(&self, kind: ReliefKind, now_millis: i64, cooldown_seconds: i64) -> usize {
        self.store(kind)
            .retain(&mut |_, last| seconds_left(last, now_millis, cooldown_seconds) > 0)
    }

    /// Number of tracked actors for `kind`.
    pub fn tracked(&self, kind: ReliefKind) -> usize {
        self.store(kind).len()
    }
}
