//! Proto-unit assembler.
//!
//! The only family whose equipment tokens carry a trailing ammo shot count,
//! and the only one with an optional main-gun location inferred from the
//! armor array. Internal structure uses the proto weight table rather than
//! the vehicle rule.

use crate::armor::PROTO;
use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::{self, EngineSpec};
use crate::error::LoadResult;
use crate::token::AmmoSuffix;
use crate::unit::{LocationSlot, MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "proto-unit",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(keys::CRUISE_MP, FieldKind::Int),
        optional(keys::ENGINE_TYPE, FieldKind::Int),
        optional(keys::CLAN_ENGINE, FieldKind::Int),
        required(keys::ARMOR, FieldKind::IntArray),
        optional(keys::ARMOR_TYPE, FieldKind::Int),
        optional(keys::ARMOR_TECH, FieldKind::Int),
        optional(keys::QUIRKS, FieldKind::StrArray),
    ],
};

/// Proto internal structure per location by weight band. Torso carries the
/// frame; limbs scale down from it. Main guns are always a single point.
fn proto_internal(weight: f64, slots: &mut [LocationSlot]) {
    let torso = ((weight / 2.0).ceil() as i32).max(1);
    let limb = ((weight / 4.0).ceil() as i32).max(1);
    for slot in slots {
        slot.internal = match slot.name.as_str() {
            "Torso" => torso,
            "Legs" => torso,
            "Right Arm" | "Left Arm" => limb,
            "Main Gun" => 1,
            _ => 1,
        };
    }
}

pub(super) fn load(block: &Block, catalog: &dyn EquipmentCatalog) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;
    let mp = super::movement_points(block)?;

    let engine = EngineSpec {
        rating: engine::standard_rating(mp, weight).max(1),
        engine_type: super::engine_type(block)?,
        flags: super::engine_flags(block, tech, false, false)?,
    };

    let decoded = PROTO.decode_armor(block.ints(keys::ARMOR)?)?;
    let no_main_gun = decoded.turret_omitted(&PROTO);
    let (mut slots, body_slot) = super::build_slots(&PROTO, &decoded);
    proto_internal(weight, &mut slots);

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        &PROTO,
        &decoded,
        &mut slots,
        body_slot,
        catalog,
        tech,
        AmmoSuffix::Trailing,
        &mut unresolved,
    )?;

    let armor_points: i32 = decoded.values.iter().sum();
    let armor = super::armor_spec(block, decoded.values)?;

    Ok(UnitRecord::builder()
        .family(UnitFamily::Proto)
        .chassis(identity.chassis)
        .model(identity.model)
        .year(identity.year)
        .source(identity.source)
        .tech_base(tech)
        .weight(weight)
        .motion(MotionType::Walker)
        .movement_points(mp)
        .locations(slots)
        .engine(engine)
        .armor(armor)
        .armor_tonnage(super::armor_tonnage(armor_points))
        .no_turret(no_main_gun)
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
