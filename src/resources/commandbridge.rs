//! Channel that carries commands from the host's command threads to the tick thread.
//!
//! Use [`setup_command_bridge`] once during initialization. Command handlers on
//! any thread clone a [`CommandSubmitter`] and push [`CommandRequest`]s; the
//! [`relief_command_system`](crate::systems::command::relief_command_system)
//! drains them non-blockingly at the start of each tick.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::command::{ChatMessage, CommandRequest};

/// Shared bridge between command threads and the ECS world.
#[derive(Resource)]
pub struct CommandBridge {
    /// Sender for [`CommandRequest`] messages (command threads -> ECS).
    pub tx_cmd: Sender<CommandRequest>,
    /// Receiver drained by the command system.
    pub rx_cmd: Receiver<CommandRequest>,
}

impl Default for CommandBridge {
    fn default() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<CommandRequest>();
        CommandBridge { tx_cmd, rx_cmd }
    }
}

impl CommandBridge {
    /// Handle that can be moved to another thread.
    pub fn submitter(&self) -> CommandSubmitter {
        CommandSubmitter {
            tx: self.tx_cmd.clone(),
        }
    }
}

/// Cloneable, thread-safe handle for submitting commands.
#[derive(Clone, Debug)]
pub struct CommandSubmitter {
    tx: Sender<CommandRequest>,
}

impl CommandSubmitter {
    /// Queue a request. Returns false if the world is gone.
    pub fn submit(&self, request: CommandRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Insert the [`CommandBridge`] and the `Messages<ChatMessage>` reply mailbox.
///
/// Returns a submitter for convenience.
pub fn setup_command_bridge(world: &mut World) -> CommandSubmitter {
    let bridge = CommandBridge::default();
    let submitter = bridge.submitter();
    world.insert_resource(bridge);
    world.insert_resource(Messages::<ChatMessage>::default());
    submitter
}
