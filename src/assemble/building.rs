//! Structure/building assembler.
//!
//! Buildings have no fixed topology. The block stores the occupied map
//! cells, a floor count per cell, and a construction factor per cell.
//! Loading is two-pass: first establish every spatial cell and its floors
//! as locations, then loop the floors to load per-floor equipment keyed by
//! a location name derived from cell and floor index.

use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::EngineSpec;
use crate::error::{LoadError, LoadResult};
use crate::mounts;
use crate::token::AmmoSuffix;
use crate::unit::{LocationSlot, MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

const COORDS: &str = "coords";
const FLOORS: &str = "floors";
const CONSTRUCTION_FACTOR: &str = "cf";

static CONTRACT: FieldContract = FieldContract {
    family: "building",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(COORDS, FieldKind::Coords),
        required(FLOORS, FieldKind::IntArray),
        required(CONSTRUCTION_FACTOR, FieldKind::IntArray),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

/// Location name for one floor of one cell. Cell and floor indices are
/// 1-based in the file grammar.
pub(crate) fn floor_location(cell: usize, floor: usize) -> String {
    format!("Cell {cell} Floor {floor}")
}

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;

    let cells = block.coords(COORDS)?;
    let floors = block.ints(FLOORS)?;
    let cf = block.ints(CONSTRUCTION_FACTOR)?;
    if floors.len() != cells.len() || cf.len() != cells.len() {
        return Err(LoadError::shape(format!(
            "building has {} cells but {} floor counts and {} construction factors",
            cells.len(),
            floors.len(),
            cf.len()
        )));
    }

    // Pass one: every cell and floor becomes a location.
    let mut slots = Vec::new();
    for (index, (&floor_count, &factor)) in floors.iter().zip(cf).enumerate() {
        if floor_count < 1 {
            return Err(LoadError::value(format!(
                "cell {} must have at least one floor, got {floor_count}",
                index + 1
            )));
        }
        if factor < 0 {
            return Err(LoadError::value(format!(
                "cell {} has negative construction factor {factor}",
                index + 1
            )));
        }
        for floor in 1..=floor_count as usize {
            let mut slot = LocationSlot::new(floor_location(index + 1, floor), None);
            slot.armor = factor;
            slot.internal = factor;
            slots.push(slot);
        }
    }

    // Pass two: per-floor equipment keyed by the derived location names.
    let mut unresolved = Vec::new();
    for slot_index in 0..slots.len() {
        let key = format!("{} Equipment", slots[slot_index].name);
        if !block.exists(&key) {
            continue;
        }
        for raw in block.strings(&key)? {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            mounts::resolve_mount(
                raw,
                slot_index,
                &mut slots,
                None,
                catalog,
                tech,
                AmmoSuffix::None,
                &mut unresolved,
            )?;
        }
    }

    let per_location: Vec<i32> = slots.iter().map(|s| s.armor).collect();
    let armor = super::armor_spec(block, per_location)?;

    Ok(UnitRecord::builder()
        .family(UnitFamily::Building)
        .chassis(identity.chassis)
        .model(identity.model)
        .year(identity.year)
        .source(identity.source)
        .tech_base(tech)
        .weight(weight)
        .motion(MotionType::Fixed)
        .locations(slots)
        .engine(EngineSpec::unpowered())
        .armor(armor)
        .cells(cells.to_vec())
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
