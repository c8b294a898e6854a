//! Aerospace fighter assembler.
//!
//! Four armored facings (nose, wings, aft) plus a synthesized fuselage for
//! equipment that needs no discrete slot. Structural integrity and
//! per-location damage thresholds are derived, never stored.

use crate::armor::AERO_FIGHTER;
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::{self, EngineSpec};
use crate::error::{LoadError, LoadResult};
use crate::token::AmmoSuffix;
use crate::unit::{MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "aerospace fighter",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        optional(keys::MOTION_TYPE, FieldKind::Str),
        required(keys::CRUISE_MP, FieldKind::Int),
        optional(keys::ENGINE_TYPE, FieldKind::Int),
        optional(keys::CLAN_ENGINE, FieldKind::Int),
        required(keys::ARMOR, FieldKind::IntArray),
        optional(keys::ARMOR_TYPE, FieldKind::Int),
        optional(keys::ARMOR_TECH, FieldKind::Int),
        optional(keys::TRANSPORTERS, FieldKind::StrArray),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;
    let motion = if block.exists(keys::MOTION_TYPE) {
        let motion = MotionType::parse(block.string(keys::MOTION_TYPE)?)?;
        if !matches!(motion, MotionType::Aerodyne | MotionType::Spheroid) {
            return Err(LoadError::value(format!(
                "aerospace fighters cannot be {motion:?}"
            )));
        }
        motion
    } else {
        MotionType::Aerodyne
    };
    let mp = super::movement_points(block)?;
    let transporters = super::transporters(block)?;

    let engine = EngineSpec {
        rating: engine::standard_rating(mp, weight),
        engine_type: super::engine_type(block)?,
        flags: super::engine_flags(block, tech, false, false)?,
    };

    let decoded = AERO_FIGHTER.decode_armor(block.ints(keys::ARMOR)?)?;
    let (mut slots, body_slot) = super::build_slots(&AERO_FIGHTER, &decoded);
    super::derive_internal(weight, &mut slots, body_slot);
    super::derive_thresholds(&mut slots);
    let structural_integrity = ((weight / 10.0).ceil() as i32).max(1);

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        &AERO_FIGHTER,
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
        .family(UnitFamily::AeroFighter)
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
        .vstol(super::flag(block, keys::VSTOL))
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
