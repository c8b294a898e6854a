//! Equipment catalog surface: definitions, the lookup trait the loader
//! depends on, and the legacy alias/size tables.
//!
//! The catalog itself is an external collaborator -- this crate never
//! interprets equipment behavior. `InMemoryCatalog` exists so callers and
//! tests have a concrete implementation to hand the loaders.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use bon::Builder;

/// Broad classification used by placement and facing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    Weapon,
    Ammo,
    Misc,
}

/// One catalog entry. `name` is the canonical resolved name, which may carry
/// a tech prefix ("Clan ", "IS ").
#[derive(Debug, Clone, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDef {
    #[builder(into)]
    pub name: String,
    pub kind: EquipmentKind,
    /// Variable-size equipment (cargo, communications gear): the slot string
    /// carries a `:SIZE:` suffix, or the legacy size table supplies a default.
    #[builder(default)]
    pub variable_size: bool,
    /// Vehicular grenade launchers get a location-dependent default facing
    /// when the slot string does not name one.
    #[builder(default)]
    pub grenade_launcher: bool,
    /// Equipment that does not occupy a discrete location slot; it is placed
    /// in the unit's body/fuselage location when one exists.
    #[builder(default)]
    pub spreadable: bool,
    /// Location-slot capacity consumed when mounted.
    #[builder(default = 1)]
    pub slots: u8,
}

/// Read-only lookup by exact canonical name. Implementations must tolerate
/// concurrent reads; loads on separate threads share one catalog.
pub trait EquipmentCatalog: Send + Sync {
    fn by_name(&self, name: &str) -> Option<Arc<EquipmentDef>>;
}

/// Simple map-backed catalog. Name matching is case-insensitive, same as
/// block keys.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    defs: HashMap<String, Arc<EquipmentDef>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: EquipmentDef) {
        self.defs
            .insert(def.name.to_ascii_lowercase(), Arc::new(def));
    }

    pub fn with_defs(defs: impl IntoIterator<Item = EquipmentDef>) -> Self {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def);
        }
        catalog
    }
}

impl EquipmentCatalog for InMemoryCatalog {
    fn by_name(&self, name: &str) -> Option<Arc<EquipmentDef>> {
        self.defs.get(&name.to_ascii_lowercase()).cloned()
    }
}

/// Deprecated equipment names mapped to their current catalog entries.
/// Files written against decades-old catalogs still resolve through here.
static LEGACY_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("machine gun ammo", "Machine Gun Ammo (Full)"),
        ("antimissilesystem", "Anti-Missile System"),
        ("searchlight", "Mounted Searchlight"),
        ("environmental sealing", "Environmental Sealing (Vehicle)"),
        ("minesweeper", "Mine Sweeper"),
        ("liftequipment", "Lift Hoist"),
    ])
});

pub fn legacy_alias(name: &str) -> Option<&'static str> {
    LEGACY_ALIASES.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Default sizes for variable-size equipment in files predating the `:SIZE:`
/// suffix. Keyed by canonical name.
static LEGACY_SIZES: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        ("cargo", 1.0),
        ("communications equipment", 1.0),
        ("mission equipment storage", 0.5),
        ("ladder", 20.0),
    ])
});

pub fn legacy_size(name: &str) -> Option<f64> {
    LEGACY_SIZES.get(name.to_ascii_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = InMemoryCatalog::with_defs([EquipmentDef::builder()
            .name("Medium Laser")
            .kind(EquipmentKind::Weapon)
            .build()]);
        assert!(catalog.by_name("medium laser").is_some());
        assert!(catalog.by_name("Small Laser").is_none());
    }

    #[test]
    fn test_legacy_alias() {
        assert_eq!(legacy_alias("SearchLight"), Some("Mounted Searchlight"));
        assert_eq!(legacy_alias("no such thing"), None);
    }

    #[test]
    fn test_legacy_size() {
        assert_eq!(legacy_size("Cargo"), Some(1.0));
        assert_eq!(legacy_size("Medium Laser"), None);
    }

    #[test]
    fn test_builder_defaults() {
        let def = EquipmentDef::builder()
            .name("Cargo")
            .kind(EquipmentKind::Misc)
            .variable_size(true)
            .build();
        assert!(!def.grenade_launcher);
        assert!(!def.spreadable);
        assert_eq!(def.slots, 1);
    }
}
