use bevy_ecs::prelude::Component;

use crate::resources::materials::Material;

/// Item carried by an item entity lying in the world.
///
/// Host-owned items carry one too, which is what the interaction guard
/// inspects when deciding whether to cancel a pickup or merge.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(material: Material) -> Self {
        ItemStack {
            material,
            amount: 1,
        }
    }
}
