//! Per-family assemblers.
//!
//! Each family runs a fixed validate-and-set sequence over one immutable
//! block: identity, tech base, weight, movement, transporters, engine
//! derivation, armor decode, internal/threshold derivation, per-location
//! equipment, optional flags, derived weights, quirks. Families omit steps
//! that do not apply to them. Every load call is independent; nothing here
//! holds cross-call state.

pub mod encode;
pub mod fields;

mod aero;
mod building;
mod gun_emplacement;
mod handheld;
mod proto;
mod small_craft;
mod support_tank;
mod vtol;

use tracing::debug;

use crate::armor::{DecodedArmor, Topology};
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::{EngineFlags, EngineType};
use crate::error::{LoadError, LoadResult};
use crate::mounts;
use crate::token::AmmoSuffix;
use crate::unit::{
    ArmorSpec, LocationSlot, TechBase, Transporter, UnitFamily, UnitRecord, UnresolvedEquipment,
};

/// Field names shared across families. Per-family fields live next to their
/// contracts.
pub mod keys {
    pub const UNIT_TYPE: &str = "unittype";
    pub const CHASSIS: &str = "chassis";
    pub const MODEL: &str = "model";
    pub const YEAR: &str = "year";
    pub const SOURCE: &str = "source";
    pub const TECH: &str = "type";
    pub const TONNAGE: &str = "tonnage";
    pub const MOTION_TYPE: &str = "motion_type";
    pub const CRUISE_MP: &str = "cruiseMP";
    pub const ENGINE_TYPE: &str = "engine_type";
    pub const CLAN_ENGINE: &str = "clan_engine";
    pub const ARMOR: &str = "armor";
    pub const ARMOR_TYPE: &str = "armor_type";
    pub const ARMOR_TECH: &str = "armor_tech";
    pub const STRUCTURAL_INTEGRITY: &str = "structural_integrity";
    pub const TRANSPORTERS: &str = "transporters";
    pub const OMNI: &str = "omni";
    pub const VSTOL: &str = "vstol";
    pub const QUIRKS: &str = "quirks";
}

/// One assembler per unit family, as a tagged union. The armor decoder,
/// engine calculator, and equipment parser are pure functions shared by
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembler {
    AeroFighter,
    Proto,
    SmallCraft,
    SupportTank,
    LargeSupportTank,
    Vtol,
    GunEmplacement,
    HandheldWeapon,
    Building,
}

impl Assembler {
    pub fn for_family(family: UnitFamily) -> Self {
        match family {
            UnitFamily::AeroFighter => Self::AeroFighter,
            UnitFamily::Proto => Self::Proto,
            UnitFamily::SmallCraft => Self::SmallCraft,
            UnitFamily::SupportTank => Self::SupportTank,
            UnitFamily::LargeSupportTank => Self::LargeSupportTank,
            UnitFamily::Vtol => Self::Vtol,
            UnitFamily::GunEmplacement => Self::GunEmplacement,
            UnitFamily::HandheldWeapon => Self::HandheldWeapon,
            UnitFamily::Building => Self::Building,
        }
    }

    pub fn load(
        self,
        block: &Block,
        catalog: &dyn EquipmentCatalog,
    ) -> LoadResult<UnitRecord> {
        match self {
            Self::AeroFighter => aero::load(block, catalog),
            Self::Proto => proto::load(block, catalog),
            Self::SmallCraft => small_craft::load(block, catalog),
            Self::SupportTank => support_tank::load(block, catalog, UnitFamily::SupportTank),
            Self::LargeSupportTank => {
                support_tank::load(block, catalog, UnitFamily::LargeSupportTank)
            }
            Self::Vtol => vtol::load(block, catalog),
            Self::GunEmplacement => gun_emplacement::load(block, catalog),
            Self::HandheldWeapon => handheld::load(block, catalog),
            Self::Building => building::load(block, catalog),
        }
    }
}

/// Load one unit, picking the assembler from the block's `unittype`
/// discriminator.
pub fn load_unit(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    let family = UnitFamily::from_discriminator(block.string(keys::UNIT_TYPE)?)?;
    debug!(family = ?family, "loading unit block");
    Assembler::for_family(family).load(block, catalog)
}

// --- Shared validate-and-set steps ---

pub(crate) struct Identity {
    pub chassis: String,
    pub model: String,
    pub year: i32,
    pub source: String,
}

pub(crate) fn identity(block: &Block) -> LoadResult<Identity> {
    Ok(Identity {
        chassis: block.string(keys::CHASSIS)?.to_string(),
        model: opt_string(block, keys::MODEL)?,
        year: block.int(keys::YEAR)?,
        source: opt_string(block, keys::SOURCE)?,
    })
}

fn opt_string(block: &Block, key: &str) -> LoadResult<String> {
    if block.exists(key) {
        Ok(block.string(key)?.to_string())
    } else {
        Ok(String::new())
    }
}

/// The `type` field carries the tech-base string ("Clan Level 2", "IS Level
/// 1", ...); only the base matters here.
pub(crate) fn tech_base(block: &Block) -> LoadResult<TechBase> {
    let value = block.string(keys::TECH)?;
    if value.to_ascii_lowercase().contains("clan") {
        Ok(TechBase::Clan)
    } else {
        Ok(TechBase::InnerSphere)
    }
}

pub(crate) fn weight(block: &Block) -> LoadResult<f64> {
    let weight = block.double(keys::TONNAGE)?;
    if weight <= 0.0 {
        return Err(LoadError::value(format!(
            "tonnage must be positive, got {weight}"
        )));
    }
    Ok(weight)
}

pub(crate) fn movement_points(block: &Block) -> LoadResult<i32> {
    let mp = block.int(keys::CRUISE_MP)?;
    if mp < 0 {
        return Err(LoadError::value(format!(
            "movement points must be non-negative, got {mp}"
        )));
    }
    Ok(mp)
}

/// Engine type override, mapped through the fixed code table; absent means
/// fusion.
pub(crate) fn engine_type(block: &Block) -> LoadResult<EngineType> {
    if block.exists(keys::ENGINE_TYPE) {
        EngineType::from_code(block.int(keys::ENGINE_TYPE)?)
    } else {
        Ok(EngineType::Fusion)
    }
}

/// Clan flag from the explicit override field when present, else inherited
/// from the unit's tech base.
pub(crate) fn engine_flags(
    block: &Block,
    tech: TechBase,
    tank: bool,
    support_vehicle: bool,
) -> LoadResult<EngineFlags> {
    let clan = if block.exists(keys::CLAN_ENGINE) {
        block.int(keys::CLAN_ENGINE)? != 0
    } else {
        tech == TechBase::Clan
    };
    Ok(EngineFlags {
        clan,
        tank,
        support_vehicle,
    })
}

/// Colon-delimited transporter descriptors: `troopspace:<tons>` and
/// `cargobay:<tons>:<doors>`.
pub(crate) fn transporters(block: &Block) -> LoadResult<Vec<Transporter>> {
    if !block.exists(keys::TRANSPORTERS) {
        return Ok(Vec::new());
    }
    block
        .strings(keys::TRANSPORTERS)?
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_transporter(raw.trim()))
        .collect()
}

fn parse_transporter(raw: &str) -> LoadResult<Transporter> {
    let parts: Vec<&str> = raw.split(':').collect();
    let parse_tons = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| LoadError::value(format!("bad transporter tonnage in {raw:?}")))
    };
    match parts[0].to_ascii_lowercase().as_str() {
        "troopspace" => {
            if parts.len() != 2 {
                return Err(LoadError::shape(format!(
                    "troopspace descriptor {raw:?} needs exactly one tonnage"
                )));
            }
            Ok(Transporter::TroopSpace {
                tons: parse_tons(parts[1])?,
            })
        }
        "cargobay" => {
            if parts.len() != 3 {
                return Err(LoadError::shape(format!(
                    "cargobay descriptor {raw:?} needs tonnage and door count"
                )));
            }
            Ok(Transporter::CargoBay {
                tons: parse_tons(parts[1])?,
                doors: parts[2].parse().map_err(|_| {
                    LoadError::value(format!("bad cargo door count in {raw:?}"))
                })?,
            })
        }
        other => Err(LoadError::value(format!(
            "unknown transporter kind {other:?}"
        ))),
    }
}

/// Quirk names, colon-separated within each entry. Recorded verbatim;
/// interpretation belongs to the domain model.
pub(crate) fn quirks(block: &Block) -> LoadResult<Vec<String>> {
    if !block.exists(keys::QUIRKS) {
        return Ok(Vec::new());
    }
    Ok(block
        .strings(keys::QUIRKS)?
        .iter()
        .flat_map(|entry| entry.split(':'))
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect())
}

pub(crate) fn flag(block: &Block, key: &str) -> bool {
    block.exists(key)
}

/// Materialize location slots from a decoded armor layout, in topology
/// order. Returns the slots and the index of the body slot, if the family
/// has one.
pub(crate) fn build_slots(
    topology: &Topology,
    decoded: &DecodedArmor,
) -> (Vec<LocationSlot>, Option<usize>) {
    let mut slots = Vec::with_capacity(decoded.locations.len());
    let mut body_slot = None;
    for (slot_index, (&topo_index, &armor)) in
        decoded.locations.iter().zip(&decoded.values).enumerate()
    {
        if Some(topo_index) == topology.body {
            body_slot = Some(slot_index);
        }
        let def = &topology.locations[topo_index];
        let mut slot = LocationSlot::new(def.name, def.slots);
        slot.armor = armor;
        slots.push(slot);
    }
    (slots, body_slot)
}

/// Auto-derive internal structure from weight: one point per started ten
/// tons for every non-body location. Runs only after every location's armor
/// is assigned.
pub(crate) fn derive_internal(weight: f64, slots: &mut [LocationSlot], body_slot: Option<usize>) {
    let internal = ((weight / 10.0).ceil() as i32).max(1);
    for (index, slot) in slots.iter_mut().enumerate() {
        slot.internal = if Some(index) == body_slot { 0 } else { internal };
    }
}

/// Aerospace damage thresholds: one per started ten points of assigned
/// armor. Must run after the armor decode.
pub(crate) fn derive_thresholds(slots: &mut [LocationSlot]) {
    for slot in slots {
        slot.threshold = (f64::from(slot.armor) / 10.0).ceil() as i32;
    }
}

/// Armor tonnage from total assigned points, 16 points per ton, rounded up
/// to the half ton.
pub(crate) fn armor_tonnage(points: i32) -> f64 {
    (f64::from(points) / 16.0 * 2.0).ceil() / 2.0
}

pub(crate) fn armor_spec(block: &Block, per_location: Vec<i32>) -> LoadResult<ArmorSpec> {
    let type_id = if block.exists(keys::ARMOR_TYPE) {
        block.int(keys::ARMOR_TYPE)?
    } else {
        0
    };
    let tech_level = if block.exists(keys::ARMOR_TECH) {
        block.int(keys::ARMOR_TECH)?
    } else {
        0
    };
    Ok(ArmorSpec {
        type_id,
        tech_level,
        per_location,
    })
}

/// Per-location equipment loop: read `"<Location> Equipment"` for every
/// location the unit has and resolve each token in order.
#[allow(clippy::too_many_arguments)]
pub(crate) fn load_equipment(
    block: &Block,
    topology: &Topology,
    decoded: &DecodedArmor,
    slots: &mut [LocationSlot],
    body_slot: Option<usize>,
    catalog: &dyn EquipmentCatalog,
    tech: TechBase,
    ammo: AmmoSuffix,
    unresolved: &mut Vec<UnresolvedEquipment>,
) -> LoadResult<()> {
    for (slot_index, &topo_index) in decoded.locations.iter().enumerate() {
        let key = format!("{} Equipment", topology.location_name(topo_index));
        if !block.exists(&key) {
            continue;
        }
        for raw in block.strings(&key)? {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            mounts::resolve_mount(
                raw, slot_index, slots, body_slot, catalog, tech, ammo, unresolved,
            )?;
        }
    }
    Ok(())
}
