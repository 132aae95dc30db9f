//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `chatformat` – host version detection and color markup translation
//! - `clock` – injectable wall clock for cooldown timestamps
//! - `commandbridge` – channel from command threads into the tick thread
//! - `cooldowns` – per-kind cooldown stores and the gate deciding activations
//! - `materials` – host material table and item construction
//! - `reliefconfig` – INI configuration and the validated settings resource
//! - `stats` – counters for reporting
//! - `tickclock` – current tick number and tick rate
pub mod chatformat;
pub mod clock;
pub mod commandbridge;
pub mod cooldowns;
pub mod materials;
pub mod reliefconfig;
pub mod stats;
pub mod tickclock;
