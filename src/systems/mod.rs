//! Per-tick systems.
//!
//! Submodules overview
//! - [`command`] – drain command requests, apply the cooldown gate, start jobs
//! - [`cooldowns`] – optional sweep of expired cooldown entries
//! - [`emission`] – advance emission jobs and spawn dropped items
//! - [`time`] – advance the tick counter
//! - [`ttl`] – despawn entities whose lifetime ran out

pub mod command;
pub mod cooldowns;
pub mod emission;
pub mod time;
pub mod ttl;
