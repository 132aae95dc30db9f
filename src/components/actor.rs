//! Player character components.
//!
//! An actor is any entity carrying [`Actor`]. The host owns these entities and
//! keeps their position, facing and online flag up to date; the emission
//! systems only read them.

use bevy_ecs::prelude::Component;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Stable unique identity of an actor, independent of its ECS entity id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Random identity for a freshly joined actor.
    pub fn new_random() -> Self {
        ActorId(Uuid::new_v4())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Marks an entity as a player character able to issue commands.
#[derive(Component, Clone, Debug)]
pub struct Actor {
    /// Identity used as the cooldown key.
    pub id: ActorId,
    /// Display name, used in logs.
    pub name: String,
    /// When false the actor is considered gone: running jobs stop on their
    /// next firing and nothing is spawned for it.
    pub online: bool,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Actor {
            id,
            name: name.into(),
            online: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.online
    }
}
