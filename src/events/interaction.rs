//! Pickup and merge cancellation for emitted items.
//!
//! The host triggers [`ItemPickupAttempt`] when an entity is about to pick an
//! item up and [`ItemMergeAttempt`] when two dropped stacks are about to merge.
//! If the item's material is one of the configured pee/poo materials, the
//! observers below write an [`InteractionCancelled`] message, and the host
//! must cancel the interaction.
//!
//! Matching is by material, not by origin: any item of a configured material
//! is protected, as the host cannot tell them apart either.

use bevy_ecs::message::Message;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::itemstack::ItemStack;
use crate::resources::reliefconfig::ReliefSettings;

/// An entity is about to pick up an item.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemPickupAttempt {
    pub item: Entity,
    pub picker: Entity,
}

/// A dropped item is about to merge into another one.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemMergeAttempt {
    pub item: Entity,
    pub target: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    Pickup,
    Merge,
}

/// Verdict for the host: cancel this interaction.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionCancelled {
    pub item: Entity,
    pub kind: InteractionKind,
}

fn is_guarded(settings: &Option<Res<ReliefSettings>>, items: &Query<&ItemStack>, item: Entity) -> bool {
    let Some(settings) = settings else {
        return false;
    };
    items
        .get(item)
        .map(|stack| settings.is_relief_material(&stack.material))
        .unwrap_or(false)
}

/// Cancel pickups of configured materials by actors.
pub fn observe_item_pickup(
    trigger: On<ItemPickupAttempt>,
    settings: Option<Res<ReliefSettings>>,
    items: Query<&ItemStack>,
    actors: Query<(), With<Actor>>,
    mut writer: MessageWriter<InteractionCancelled>,
) {
    let event = trigger.event();
    if !actors.contains(event.picker) {
        return;
    }
    if is_guarded(&settings, &items, event.item) {
        writer.write(InteractionCancelled {
            item: event.item,
            kind: InteractionKind::Pickup,
        });
    }
}

/// Cancel merges of configured materials.
pub fn observe_item_merge(
    trigger: On<ItemMergeAttempt>,
    settings: Option<Res<ReliefSettings>>,
    items: Query<&ItemStack>,
    mut writer: MessageWriter<InteractionCancelled>,
) {
    let event = trigger.event();
    if is_guarded(&settings, &items, event.item) {
        writer.write(InteractionCancelled {
            item: event.item,
            kind: InteractionKind::Merge,
        });
    }
}
