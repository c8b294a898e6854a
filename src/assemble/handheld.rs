//! Hand-held weapon assembler.
//!
//! The smallest family: one location, no movement, no engine. Everything
//! mounts on the single gun location.

use crate::armor::HANDHELD_WEAPON;
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::EngineSpec;
use crate::error::LoadResult;
use crate::token::AmmoSuffix;
use crate::unit::{MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "hand-held weapon",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(keys::ARMOR, FieldKind::IntArray),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;

    let decoded = HANDHELD_WEAPON.decode_armor(block.ints(keys::ARMOR)?)?;
    let (mut slots, body_slot) = super::build_slots(&HANDHELD_WEAPON, &decoded);
    super::derive_internal(weight, &mut slots, body_slot);

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        &HANDHELD_WEAPON,
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
        .family(UnitFamily::HandheldWeapon)
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
        .armor_tonnage(super::armor_tonnage(armor_points))
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
