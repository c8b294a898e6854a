//! Equipment token resolution and placement.
//!
//! `token` handles the lexical pipeline; this module resolves the remaining
//! name against the catalog (unprefixed, tech-prefixed, then the legacy
//! alias table) and places the resulting mount, enforcing location slot
//! capacity. Unknown equipment is recorded as a diagnostic and the load
//! continues; a full location is fatal.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{self, EquipmentCatalog, EquipmentDef};
use crate::error::{LoadError, LoadResult};
use crate::token::{self, AmmoSuffix, FACING_NONE};
use crate::unit::{EquipmentMount, LocationSlot, TechBase, UnresolvedEquipment};

pub fn resolve_mount(
    raw: &str,
    location: usize,
    slots: &mut [LocationSlot],
    body: Option<usize>,
    catalog: &dyn EquipmentCatalog,
    tech: TechBase,
    ammo: AmmoSuffix,
    unresolved: &mut Vec<UnresolvedEquipment>,
) -> LoadResult<()> {
    let parts = token::parse_token(raw, ammo)?;

    let Some(equipment) = lookup(catalog, &parts.name, tech) else {
        warn!(token = raw, location = %slots[location].name, "unresolved equipment");
        unresolved.push(UnresolvedEquipment {
            location: slots[location].name.clone(),
            raw: raw.to_string(),
        });
        return Ok(());
    };
    debug!(name = %equipment.name, location = %slots[location].name, "resolved equipment");

    // Equipment without a discrete slot goes to the body/fuselage when the
    // family has one.
    let target = if equipment.spreadable {
        body.unwrap_or(location)
    } else {
        location
    };

    let size = match parts.size {
        Some(size) => Some(size),
        None if equipment.variable_size => catalog::legacy_size(&parts.name),
        None => None,
    };

    let facing = if parts.facing == FACING_NONE && equipment.grenade_launcher {
        default_launcher_facing(&slots[target].name, parts.rear)
    } else {
        parts.facing
    };

    let mount = EquipmentMount {
        equipment,
        location: target,
        rear: parts.rear,
        facing,
        size,
        shots: parts.shots,
    };
    slots[target]
        .try_mount(mount)
        .map_err(|inner| LoadError::placement(format!("could not add {raw:?}: {inner}")))
}

/// Unprefixed name, then tech-prefixed, then the legacy alias table (itself
/// tried both ways).
fn lookup(
    catalog: &dyn EquipmentCatalog,
    name: &str,
    tech: TechBase,
) -> Option<Arc<EquipmentDef>> {
    if let Some(def) = lookup_with_prefix(catalog, name, tech) {
        return Some(def);
    }
    let alias = catalog::legacy_alias(name)?;
    lookup_with_prefix(catalog, alias, tech)
}

fn lookup_with_prefix(
    catalog: &dyn EquipmentCatalog,
    name: &str,
    tech: TechBase,
) -> Option<Arc<EquipmentDef>> {
    catalog
        .by_name(name)
        .or_else(|| catalog.by_name(&format!("{}{name}", tech.prefix())))
}

/// Vehicular grenade launchers with no explicit facing default by location:
/// left-side locations fire front-left, right-side front-right, rear mounts
/// fire rear.
fn default_launcher_facing(location_name: &str, rear: bool) -> i8 {
    let lower = location_name.to_ascii_lowercase();
    if rear || lower.contains("rear") || lower.contains("aft") {
        3
    } else if lower.contains("left") {
        5
    } else if lower.contains("right") {
        1
    } else {
        0
    }
}
