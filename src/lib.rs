//! Poo and Pee library.
//!
//! Two novelty commands, `pee` and `poo`, make an actor emit short-lived
//! cosmetic items for a few seconds, guarded by per-actor cooldowns. This
//! crate holds the ECS components, resources, systems, and events for a host
//! world to embed, plus a headless simulator binary.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod kind;
pub mod math;
pub mod resources;
pub mod systems;
