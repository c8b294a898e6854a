//! Support tank assembler, shared by the standard and large hulls.
//!
//! The two hulls differ only in topology (the large hull splits the side
//! facings); the field contract and sequence are identical. Engine rating
//! uses the ground-vehicle formula with the suspension offset.

use crate::block::Block;
use crate::catalog::EquipmentCatalog;
use crate::engine::{self, EngineSpec};
use crate::error::{LoadError, LoadResult};
use crate::token::AmmoSuffix;
use crate::unit::{MotionType, UnitFamily, UnitRecord};

use super::fields::{FieldContract, FieldKind, optional, required};
use super::keys;

static CONTRACT: FieldContract = FieldContract {
    family: "support tank",
    fields: &[
        required(keys::CHASSIS, FieldKind::Str),
        optional(keys::MODEL, FieldKind::Str),
        required(keys::YEAR, FieldKind::Int),
        optional(keys::SOURCE, FieldKind::Str),
        required(keys::TECH, FieldKind::Str),
        required(keys::TONNAGE, FieldKind::Double),
        required(keys::MOTION_TYPE, FieldKind::Str),
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

pub(super) fn load(
    block: &Block,
    catalog: &dyn EquipmentCatalog,
    family: UnitFamily,
) -> LoadResult<UnitRecord> {
    CONTRACT.check(block)?;
    // Both tank hulls have a topology; the unwrap is on our own table.
    let topology = family.topology().unwrap();

    let identity = super::identity(block)?;
    let tech = super::tech_base(block)?;
    let weight = super::weight(block)?;
    let motion = MotionType::parse(block.string(keys::MOTION_TYPE)?)?;
    if !matches!(
        motion,
        MotionType::Wheeled
            | MotionType::Tracked
            | MotionType::Hover
            | MotionType::Naval
            | MotionType::Wige
    ) {
        return Err(LoadError::value(format!(
            "{} cannot be {motion:?}",
            topology.family
        )));
    }
    let mp = super::movement_points(block)?;
    let transporters = super::transporters(block)?;

    let engine = EngineSpec {
        rating: engine::ground_rating(mp, weight, motion)?,
        engine_type: super::engine_type(block)?,
        flags: super::engine_flags(block, tech, true, true)?,
    };

    let decoded = topology.decode_armor(block.ints(keys::ARMOR)?)?;
    let no_turret = decoded.turret_omitted(topology);
    let (mut slots, body_slot) = super::build_slots(topology, &decoded);
    super::derive_internal(weight, &mut slots, body_slot);

    let mut unresolved = Vec::new();
    super::load_equipment(
        block,
        topology,
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
        .family(family)
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
        .transporters(transporters)
        .omni(super::flag(block, keys::OMNI))
        .no_turret(no_turret)
        .quirks(super::quirks(block)?)
        .unresolved(unresolved)
        .build())
}
