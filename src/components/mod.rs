//! ECS components for entities.
//!
//! This module groups all component types attached to entities in the world:
//! the host-owned actors, the emission jobs started by commands, and the
//! short-lived items those jobs drop.
//!
//! Submodules overview:
//! - [`actor`] – player identity and online flag
//! - [`droppeditem`] – marker for items emitted by a job
//! - [`emissionjob`] – periodic emitter state machine and per-kind profiles
//! - [`facing`] – look direction of an actor
//! - [`itemstack`] – material and amount of an item entity
//! - [`rigidbody`] – initial velocity handed to the host
//! - [`ttl`] – tick countdown that despawns the entity
//! - [`worldposition`] – world-space position

pub mod actor;
pub mod droppeditem;
pub mod emissionjob;
pub mod facing;
pub mod itemstack;
pub mod rigidbody;
pub mod ttl;
pub mod worldposition;
