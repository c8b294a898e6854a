//! Gun emplacement assembler.
//!
//! A fixed weapons platform: no movement fields at all, an unpowered engine
//! sentinel, and a two-location topology (guns plus optional turret).

use crate::armor::GUN_EMPLACEMENT;
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::EngineSpec;
use crate::error::LoadResult;
use crate::token::AmmoSuffix;
use crate::unit::{MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "gun emplacement",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(keys::ARMOR, FieldKind::IntArray),
        optional(keys::ARMOR_TYPE, FieldKind::Int),
        optional(keys::ARMOR_TECH, FieldKind::Int),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;

    let decoded = GUN_EMPLACEMENT.decode_armor(block.ints(keys::ARMOR)?)?;
    let no_turret = decoded.turret_omitted(&GUN_EMPLACEMENT);
    let (mut slots, body_slot) = super::build_slots(&GUN_EMPLACEMENT, &decoded);
    super::derive_internal(weight, &mut slots, body_slot);

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        &GUN_EMPLACEMENT,
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
        .family(UnitFamily::GunEmplacement)
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
        .no_turret(no_turret)
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
