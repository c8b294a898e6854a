//! Small craft assembler.
//!
//! Shares the aerospace shape (nose, sides, aft plus fuselage) but the
//! format fixes the engine rating at a constant, and structural integrity
//! may be stored explicitly.

use crate::armor::SMALL_CRAFT;
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::{EngineSpec, SMALL_CRAFT_ENGINE_RATING};
use crate::error::{LoadError, LoadResult};
use crate::token::AmmoSuffix;
use crate::unit::{MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "small craft",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(keys::MOTION_TYPE, FieldKind::Str),
        required(keys::CRUISE_MP, FieldKind::Int),
        optional(keys::CLAN_ENGINE, FieldKind::Int),
        required(keys::ARMOR, FieldKind::IntArray),
        optional(keys::ARMOR_TYPE, FieldKind::Int),
        optional(keys::ARMOR_TECH, FieldKind::Int),
        optional(keys::STRUCTURAL_INTEGRITY, FieldKind::Int),
        optional(keys::TRANSPORTERS, FieldKind::StrArray),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;
    let motion = MotionType::parse(block.string(keys::MOTION_TYPE)?)?;
    if !matches!(motion, MotionType::Aerodyne | MotionType::Spheroid) {
        return Err(LoadError::value(format!(
            "small craft cannot be {motion:?}"
        )));
    }
    let mp = super::movement_points(block)?;
    let transporters = super::transporters(block)?;

    // The small-craft format is the one place the rating is not derived
    // from movement; it is fixed by the class.
    let engine = EngineSpec {
        rating: SMALL_CRAFT_ENGINE_RATING,
        engine_type: super::engine_type(block)?,
        flags: super::engine_flags(block, tech, false, false)?,
    };

    let decoded = SMALL_CRAFT.decode_armor(block.ints(keys::ARMOR)?)?;
    let (mut slots, body_slot) = super::build_slots(&SMALL_CRAFT, &decoded);
    super::derive_internal(weight, &mut slots, body_slot);
    super::derive_thresholds(&mut slots);
    let structural_integrity = if block.exists(keys::STRUCTURAL_INTEGRITY) {
        block.int(keys::STRUCTURAL_INTEGRITY)?
    } else {
        ((weight / 10.0).ceil() as i32).max(1)
    };

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        &SMALL_CRAFT,
        &decoded,
        &mut slots,
        body_slot,
        catalog,
        tech,
        AmmoSuffix::None,
        &mut unresolved,
    )?;

    let armor_points: i32 = decoded.values.iter().sum();
    let armor = super::armor_spec(block, decoded.values)?;

    Ok(UnitRecord::builder()
        .family(UnitFamily::SmallCraft)
        .chassis(identity.chassis)
        .model(identity.model)
        .year(identity.year)
        .source(identity.source)
        .tech_base(tech)
        .weight(weight)
        .motion(motion)
        .movement_points(mp)
        .locations(slots)
        .engine(engine)
        .armor(armor)
        .armor_tonnage(super::armor_tonnage(armor_points))
        .structural_integrity(structural_integrity)
        .transporters(transporters)
        .omni(super::flag(block, keys::OMNI))
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
