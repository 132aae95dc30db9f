//! Known materials and item construction.
//!
//! The [`MaterialRegistry`] stands in for the host's material table. Config
//! names are resolved against it at startup, and every emitted item is built
//! through [`MaterialRegistry::create_item`], which falls back to
//! [`FALLBACK_MATERIAL`] at the call site when construction fails.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::components::itemstack::ItemStack;
use crate::error::SpawnError;

/// Material substituted when an item cannot be built.
pub const FALLBACK_MATERIAL: &str = "STONE";

/// (name, is_item) pairs loaded by [`MaterialRegistry::with_defaults`].
const DEFAULT_MATERIALS: &[(&str, bool)] = &[
    ("AIR", false),
    ("STONE", true),
    ("DIRT", true),
    ("COBBLESTONE", true),
    ("SAND", true),
    ("GRAVEL", true),
    ("YELLOW_DYE", true),
    ("BROWN_DYE", true),
    ("COCOA_BEANS", true),
    ("GOLD_NUGGET", true),
    ("GLOWSTONE_DUST", true),
    ("SLIME_BALL", true),
    ("YELLOW_WOOL", true),
    ("BROWN_WOOL", true),
    ("YELLOW_STAINED_GLASS", true),
    ("BROWN_MUSHROOM", true),
    ("HONEYCOMB", true),
    ("INK_SACK", true),
    ("WOOL", true),
    ("WATER", false),
    ("LAVA", false),
    ("FIRE", false),
];

/// Upper-cased material name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Material(String);

impl Material {
    /// Normalizes the name the way config lookups do (trimmed, upper case).
    pub fn new(name: &str) -> Self {
        Material(name.trim().to_ascii_uppercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Material table of the host, keyed by upper-cased name.
#[derive(Resource, Debug, Clone)]
pub struct MaterialRegistry {
    materials: FxHashMap<String, bool>,
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MaterialRegistry {
    /// An empty registry. Note that even the fallback must be registered to be valid.
    pub fn empty() -> Self {
        MaterialRegistry {
            materials: FxHashMap::default(),
        }
    }

    /// Registry pre-filled with the built-in material table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for (name, is_item) in DEFAULT_MATERIALS {
            registry.register(name, *is_item);
        }
        registry
    }

    /// Add or replace a material.
    pub fn register(&mut self, name: &str, is_item: bool) {
        self.materials.insert(Material::new(name).0, is_item);
    }

    /// Remove a material; returns whether it was known.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.materials.remove(Material::new(name).name()).is_some()
    }

    /// Look up a material by case-insensitive name.
    pub fn resolve(&self, name: &str) -> Option<Material> {
        let material = Material::new(name);
        self.materials.contains_key(material.name()).then_some(material)
    }

    /// Build a single item of `material`.
    pub fn create_item(&self, material: &Material) -> Result<ItemStack, SpawnError> {
        match self.materials.get(material.name()) {
            Some(true) => Ok(ItemStack::new(material.clone())),
            Some(false) => Err(SpawnError::NotAnItem(material.to_string())),
            None => Err(SpawnError::UnknownMaterial(material.to_string())),
        }
    }

    /// The substitute item used when [`create_item`](Self::create_item) fails.
    pub fn fallback_item(&self) -> ItemStack {
        ItemStack::new(Material::new(FALLBACK_MATERIAL))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = MaterialRegistry::with_defaults();
        assert_eq!(
            registry.resolve("yellow_dye"),
            Some(Material::new("YELLOW_DYE"))
        );
        assert_eq!(registry.resolve("  Brown_Dye "), Some(Material::new("BROWN_DYE")));
        assert_eq!(registry.resolve("not_a_thing"), None);
    }

    #[test]
    fn test_create_item() {
        let registry = MaterialRegistry::with_defaults();
        let item = registry.create_item(&Material::new("gold_nugget")).unwrap();
        assert_eq!(item.material.name(), "GOLD_NUGGET");
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn test_create_item_errors() {
        let mut registry = MaterialRegistry::with_defaults();
        assert_eq!(
            registry.create_item(&Material::new("water")),
            Err(SpawnError::NotAnItem("WATER".into()))
        );
        registry.unregister("YELLOW_DYE");
        assert_eq!(
            registry.create_item(&Material::new("YELLOW_DYE")),
            Err(SpawnError::UnknownMaterial("YELLOW_DYE".into()))
        );
    }

    #[test]
    fn test_fallback_item() {
        let registry = MaterialRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.fallback_item().material.name(), FALLBACK_MATERIAL);
    }
}
