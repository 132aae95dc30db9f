//! Command requests and chat replies.
//!
//! Requests travel from any thread to the tick thread through the
//! [`CommandBridge`](crate::resources::commandbridge::CommandBridge). Replies
//! are written as [`ChatMessage`]s into the ECS `Messages<ChatMessage>` mailbox,
//! which the host drains once per tick and delivers.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::kind::ReliefKind;

/// Who issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSender {
    /// An entity; only entities with an `Actor` component may activate.
    Entity(Entity),
    /// The server console.
    Console,
}

/// A `/pee` or `/poo` invocation. Arguments are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    pub sender: CommandSender,
    pub kind: ReliefKind,
}

impl CommandRequest {
    pub fn new(sender: CommandSender, kind: ReliefKind) -> Self {
        CommandRequest { sender, kind }
    }
}

/// Formatted text for the sender of a command.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub recipient: CommandSender,
    pub text: String,
}
