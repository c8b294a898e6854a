//! Encode a loaded record back into a block.
//!
//! Supported for the families whose loaders read every field the encoder
//! writes (aerospace fighters and both support-tank hulls), which gives the
//! load/encode/load round trip. Families with derived-only location names
//! (buildings) or stored-constant engines are not encoded.

use itertools::Itertools;

use crate::block::Block;
use crate::error::{LoadError, LoadResult};
use crate::unit::{EquipmentMount, TechBase, Transporter, UnitFamily, UnitRecord};

use super::keys;

pub fn encode_unit(record: &UnitRecord) -> LoadResult<Block> {
    if !matches!(
        record.family,
        UnitFamily::AeroFighter | UnitFamily::SupportTank | UnitFamily::LargeSupportTank
    ) {
        return Err(LoadError::value(format!(
            "encoding is not supported for {:?}",
            record.family
        )));
    }
    // Encodable families all have a fixed topology.
    let topology = record.family.topology().unwrap();
    let body_name = topology.body.map(|b| topology.locations[b].name);

    let mut block = Block::new();
    block.set_string(keys::UNIT_TYPE, record.family.discriminator());
    block.set_string(keys::CHASSIS, &record.chassis);
    if !record.model.is_empty() {
        block.set_string(keys::MODEL, &record.model);
    }
    block.set_int(keys::YEAR, record.year);
    if !record.source.is_empty() {
        block.set_string(keys::SOURCE, &record.source);
    }
    block.set_string(
        keys::TECH,
        match record.tech_base {
            TechBase::Clan => "Clan",
            TechBase::InnerSphere => "IS",
        },
    );
    block.set_double(keys::TONNAGE, record.weight);
    block.set_string(keys::MOTION_TYPE, record.motion.as_str());
    block.set_int(keys::CRUISE_MP, record.movement_points);
    block.set_int(keys::ENGINE_TYPE, record.engine.engine_type.code());
    block.set_int(keys::CLAN_ENGINE, i32::from(record.engine.flags.clan));

    let armor: Vec<i32> = record
        .locations
        .iter()
        .filter(|slot| Some(slot.name.as_str()) != body_name)
        .map(|slot| slot.armor)
        .collect();
    block.set_ints(keys::ARMOR, armor);
    if record.armor.type_id != 0 {
        block.set_int(keys::ARMOR_TYPE, record.armor.type_id);
    }
    if record.armor.tech_level != 0 {
        block.set_int(keys::ARMOR_TECH, record.armor.tech_level);
    }

    if !record.transporters.is_empty() {
        let descriptors = record
            .transporters
            .iter()
            .map(|t| match t {
                Transporter::TroopSpace { tons } => format!("troopspace:{tons}"),
                Transporter::CargoBay { tons, doors } => format!("cargobay:{tons}:{doors}"),
            })
            .collect();
        block.set_strings(keys::TRANSPORTERS, descriptors);
    }

    if record.omni {
        block.set_int(keys::OMNI, 1);
    }
    if record.vstol {
        block.set_int(keys::VSTOL, 1);
    }
    if !record.quirks.is_empty() {
        block.set_string(keys::QUIRKS, &record.quirks.iter().join(":"));
    }

    for slot in &record.locations {
        if slot.mounts.is_empty() {
            continue;
        }
        let tokens = slot.mounts.iter().map(format_mount).collect();
        block.set_strings(&format!("{} Equipment", slot.name), tokens);
    }

    Ok(block)
}

fn format_mount(mount: &EquipmentMount) -> String {
    let mut token = String::new();
    if mount.rear {
        token.push_str("(R) ");
    }
    token.push_str(&mount.equipment.name);
    if let Some(size) = mount.size {
        token.push_str(&format!(":SIZE:{size}"));
    }
    match mount.facing {
        5 => token.push_str("(FL)"),
        1 => token.push_str("(FR)"),
        4 => token.push_str("(RL)"),
        2 => token.push_str("(RR)"),
        _ => {}
    }
    token
}
