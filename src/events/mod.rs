//! Event and message types, plus the observers that react to them.
//!
//! Submodules:
//! - [`command`] – command requests and chat replies
//! - [`emission`] – notification when an emission job terminates
//! - [`interaction`] – pickup/merge attempts and their cancellation verdicts
pub mod command;
pub mod emission;
pub mod interaction;
