//! Integration tests: full family loads against an in-memory catalog.

use blkunit::block::{Block, Coord};
use blkunit::catalog::{EquipmentDef, EquipmentKind, InMemoryCatalog};
use blkunit::engine::EngineType;
use blkunit::error::LoadError;
use blkunit::token::FACING_NONE;
use blkunit::unit::{MotionType, TechBase, Transporter, UnitFamily};
use blkunit::{encode_unit, load_unit};

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_defs([
        EquipmentDef::builder()
            .name("Medium Laser")
            .kind(EquipmentKind::Weapon)
            .build(),
        EquipmentDef::builder()
            .name("Clan ER Medium Laser")
            .kind(EquipmentKind::Weapon)
            .build(),
        EquipmentDef::builder()
            .name("Machine Gun")
            .kind(EquipmentKind::Weapon)
            .build(),
        EquipmentDef::builder()
            .name("Ammo Type")
            .kind(EquipmentKind::Ammo)
            .build(),
        EquipmentDef::builder()
            .name("Cargo")
            .kind(EquipmentKind::Misc)
            .variable_size(true)
            .spreadable(true)
            .build(),
        EquipmentDef::builder()
            .name("Vehicular Grenade Launcher")
            .kind(EquipmentKind::Weapon)
            .grenade_launcher(true)
            .build(),
        EquipmentDef::builder()
            .name("Mounted Searchlight")
            .kind(EquipmentKind::Misc)
            .build(),
    ])
}

fn base_block(unit_type: &str) -> Block {
    let mut block = Block::new();
    block.set_string("unittype", unit_type);
    block.set_string("chassis", "Test Chassis");
    block.set_string("model", "A1");
    block.set_int("year", 3055);
    block.set_string("source", "TRO Test");
    block.set_string("type", "IS Level 2");
    block.set_double("tonnage", 50.0);
    block
}

fn aero_block() -> Block {
    let mut block = base_block("AeroFighter");
    block.set_string("motion_type", "Aerodyne");
    block.set_int("cruiseMP", 6);
    block.set_ints("armor", vec![30, 20, 20, 15]);
    block.set_strings(
        "Nose Equipment",
        vec!["Medium Laser".into(), "Medium Laser".into()],
    );
    block.set_strings("Fuselage Equipment", vec!["Cargo:SIZE:2.5".into()]);
    block
}

fn support_tank_block() -> Block {
    let mut block = base_block("SupportTank");
    block.set_string("motion_type", "Tracked");
    block.set_int("cruiseMP", 4);
    block.set_ints("armor", vec![20, 15, 15, 10, 12]);
    block.set_strings("Front Equipment", vec!["Medium Laser".into()]);
    block.set_strings(
        "Turret Equipment",
        vec!["(R) Machine Gun".into(), "Vehicular Grenade Launcher".into()],
    );
    block.set_strings(
        "transporters",
        vec!["troopspace:4".into(), "cargobay:2.5:1".into()],
    );
    block.set_string("quirks", "easy_maintain:rugged");
    block
}

// --- Aerospace fighter ---

#[test]
fn test_aero_load() {
    let unit = load_unit(&aero_block(), &catalog()).unwrap();
    assert_eq!(unit.family, UnitFamily::AeroFighter);
    assert_eq!(unit.chassis, "Test Chassis");
    assert_eq!(unit.tech_base, TechBase::InnerSphere);
    assert_eq!(unit.weight, 50.0);
    assert_eq!(unit.movement_points, 6);

    let names: Vec<&str> = unit.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Fuselage", "Nose", "Right Wing", "Left Wing", "Aft"]
    );
    assert_eq!(unit.location("Nose").unwrap().armor, 30);
    assert_eq!(unit.location("Aft").unwrap().armor, 15);
    assert_eq!(unit.location("Fuselage").unwrap().armor, 0);
    assert_eq!(unit.location("Nose").unwrap().mounts.len(), 2);
    assert!(unit.unresolved.is_empty());

    // rating = 6 * 50; SI and thresholds derived after the armor decode.
    assert_eq!(unit.engine.rating, 300);
    assert_eq!(unit.engine.engine_type, EngineType::Fusion);
    assert_eq!(unit.structural_integrity, Some(5));
    assert_eq!(unit.location("Nose").unwrap().threshold, 3);
    assert_eq!(unit.location("Aft").unwrap().threshold, 2);

    // 85 points at 16 per ton, rounded up to the half ton.
    assert_eq!(unit.armor_tonnage, 5.5);

    // Spreadable cargo lands in the fuselage with its parsed size.
    let fuselage = unit.location("Fuselage").unwrap();
    assert_eq!(fuselage.mounts.len(), 1);
    assert_eq!(fuselage.mounts[0].size, Some(2.5));
}

#[test]
fn test_aero_bad_armor_shape() {
    let mut block = aero_block();
    block.set_ints("armor", vec![30, 20, 20]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidShape { .. }
    ));
}

#[test]
fn test_unknown_equipment_is_not_fatal() {
    let mut block = aero_block();
    block.set_strings("Left Wing Equipment", vec!["Phase Cannon".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();
    assert_eq!(unit.unresolved.len(), 1);
    assert_eq!(unit.unresolved[0].raw, "Phase Cannon");
    assert_eq!(unit.unresolved[0].location, "Left Wing");
}

#[test]
fn test_legacy_alias_resolves() {
    let mut block = aero_block();
    block.set_strings("Right Wing Equipment", vec!["SearchLight".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();
    let wing = unit.location("Right Wing").unwrap();
    assert_eq!(wing.mounts[0].equipment.name, "Mounted Searchlight");
}

// --- Missing tonnage fails every family ---

#[test]
fn test_missing_tonnage_fails_every_family() {
    for family in [
        "AeroFighter",
        "ProtoMek",
        "SmallCraft",
        "SupportTank",
        "LargeSupportTank",
        "SupportVTOL",
        "GunEmplacement",
        "HandheldWeapon",
        "Building",
    ] {
        let mut block = base_block(family);
        block.remove("tonnage");
        match load_unit(&block, &catalog()).unwrap_err() {
            LoadError::MissingField { field } => assert_eq!(field, "tonnage", "family {family}"),
            other => panic!("family {family}: expected missing tonnage, got {other:?}"),
        }
    }
}

// --- Support tank ---

#[test]
fn test_support_tank_load() {
    let unit = load_unit(&support_tank_block(), &catalog()).unwrap();
    assert_eq!(unit.family, UnitFamily::SupportTank);
    assert_eq!(unit.motion, MotionType::Tracked);

    // Five stored values: single turret, no rear turret.
    let names: Vec<&str> = unit.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Body", "Front", "Right", "Left", "Rear", "Turret"]);
    assert!(!unit.no_turret);

    // Tracked: no suspension offset. 4 * 50 = 200.
    assert_eq!(unit.engine.rating, 200);
    assert!(unit.engine.flags.tank);
    assert!(unit.engine.flags.support_vehicle);
    assert!(!unit.engine.flags.clan);

    // Internal structure derived after armor: ceil(50 / 10) everywhere but
    // the body.
    assert_eq!(unit.location("Front").unwrap().internal, 5);
    assert_eq!(unit.location("Body").unwrap().internal, 0);

    let turret = unit.location("Turret").unwrap();
    assert_eq!(turret.mounts.len(), 2);
    assert!(turret.mounts[0].rear);
    // Grenade launcher with no explicit facing defaults by location.
    assert_eq!(turret.mounts[1].facing, 0);

    assert_eq!(
        unit.transporters,
        vec![
            Transporter::TroopSpace { tons: 4.0 },
            Transporter::CargoBay {
                tons: 2.5,
                doors: 1
            },
        ]
    );
    assert_eq!(unit.quirks, vec!["easy_maintain", "rugged"]);
}

#[test]
fn test_support_tank_no_turret_variant() {
    let mut block = support_tank_block();
    block.set_ints("armor", vec![20, 15, 15, 10]);
    block.remove("Turret Equipment");
    let unit = load_unit(&block, &catalog()).unwrap();
    assert!(unit.no_turret);
    assert_eq!(unit.locations.len(), 5);
    assert!(unit.location("Turret").is_none());
}

#[test]
fn test_hover_engine_rating_hand_computed() {
    let mut block = support_tank_block();
    block.set_string("motion_type", "Hover");
    block.set_int("cruiseMP", 5);
    // 5 * 50 - 235 = 15, already a multiple of 5 and above the floor.
    let unit = load_unit(&block, &catalog()).unwrap();
    assert_eq!(unit.engine.rating, 15);
}

#[test]
fn test_bad_transporter_descriptors() {
    let mut block = support_tank_block();
    block.set_strings("transporters", vec!["cargobay:2.5".into()]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidShape { .. }
    ));

    let mut block = support_tank_block();
    block.set_strings("transporters", vec!["troopspace:lots".into()]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidValue { .. }
    ));
}

#[test]
fn test_bad_motion_type() {
    let mut block = support_tank_block();
    block.set_string("motion_type", "crawling");
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidValue { .. }
    ));
}

// --- Proto units ---

fn proto_block() -> Block {
    let mut block = base_block("ProtoMek");
    block.set_string("type", "Clan Level 2");
    block.set_double("tonnage", 8.0);
    block.set_int("cruiseMP", 4);
    block.set_ints("armor", vec![8, 2, 4, 4, 6, 5]);
    block.set_strings("Torso Equipment", vec!["Ammo Type (30)".into()]);
    block.set_strings("Main Gun Equipment", vec!["ER Medium Laser".into()]);
    block
}

#[test]
fn test_proto_load() {
    let unit = load_unit(&proto_block(), &catalog()).unwrap();
    assert_eq!(unit.family, UnitFamily::Proto);
    assert_eq!(unit.tech_base, TechBase::Clan);
    assert_eq!(unit.locations.len(), 6);

    let torso = unit.location("Torso").unwrap();
    assert_eq!(torso.mounts[0].shots, Some(30));
    assert_eq!(torso.mounts[0].equipment.name, "Ammo Type");

    // Resolved through the Clan tech prefix.
    let main_gun = unit.location("Main Gun").unwrap();
    assert_eq!(main_gun.mounts[0].equipment.name, "Clan ER Medium Laser");
    assert!(unit.engine.flags.clan);
}

#[test]
fn test_proto_bad_ammo_count_is_fatal() {
    let mut block = proto_block();
    block.set_strings("Torso Equipment", vec!["Ammo Type (-1)".into()]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidValue { .. }
    ));
}

#[test]
fn test_proto_full_location_is_fatal() {
    let mut block = proto_block();
    block.set_strings(
        "Right Arm Equipment",
        vec!["Medium Laser".into(), "Medium Laser".into()],
    );
    match load_unit(&block, &catalog()).unwrap_err() {
        LoadError::Placement { detail } => assert!(detail.contains("Right Arm")),
        other => panic!("expected placement error, got {other:?}"),
    }
}

// --- VTOL ---

#[test]
fn test_vtol_load() {
    let mut block = base_block("SupportVTOL");
    block.set_double("tonnage", 25.0);
    block.set_string("motion_type", "VTOL");
    block.set_int("cruiseMP", 8);
    block.set_ints("armor", vec![12, 10, 10, 8, 2]);
    let unit = load_unit(&block, &catalog()).unwrap();

    // No chin turret at five stored values; rotor still present.
    assert!(unit.no_turret);
    assert!(unit.location("Rotor").is_some());
    assert!(unit.location("Chin Turret").is_none());

    // 8 * 25 - 140 (30-ton rotor band) = 60.
    assert_eq!(unit.engine.rating, 60);
}

#[test]
fn test_vtol_requires_vtol_motion() {
    let mut block = base_block("SupportVTOL");
    block.set_double("tonnage", 25.0);
    block.set_string("motion_type", "Tracked");
    block.set_int("cruiseMP", 8);
    block.set_ints("armor", vec![12, 10, 10, 8, 2]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidValue { .. }
    ));
}

// --- Fixed-structure families ---

#[test]
fn test_gun_emplacement_load() {
    let mut block = base_block("GunEmplacement");
    block.set_ints("armor", vec![40, 30]);
    block.set_strings("Turret Equipment", vec!["Machine Gun".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();

    assert_eq!(unit.motion, MotionType::Fixed);
    assert_eq!(unit.engine.rating, 0);
    assert_eq!(unit.engine.engine_type, EngineType::None);
    assert_eq!(unit.location("Turret").unwrap().mounts.len(), 1);
}

#[test]
fn test_handheld_weapon_load() {
    let mut block = base_block("HandheldWeapon");
    block.set_double("tonnage", 5.0);
    block.set_ints("armor", vec![10]);
    block.set_strings("Gun Equipment", vec!["Medium Laser".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();

    assert_eq!(unit.locations.len(), 1);
    assert_eq!(unit.location("Gun").unwrap().armor, 10);
    assert_eq!(unit.engine.engine_type, EngineType::None);
}

#[test]
fn test_building_two_pass_load() {
    let mut block = base_block("Building");
    block.set_coords("coords", vec![Coord::new(3, 4), Coord::new(3, 5)]);
    block.set_ints("floors", vec![2, 1]);
    block.set_ints("cf", vec![15, 12]);
    block.set_strings("Cell 1 Floor 2 Equipment", vec!["Machine Gun".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();

    let names: Vec<&str> = unit.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Cell 1 Floor 1", "Cell 1 Floor 2", "Cell 2 Floor 1"]
    );
    assert_eq!(unit.locations[1].mounts.len(), 1);
    assert_eq!(unit.locations[0].armor, 15);
    assert_eq!(unit.locations[2].armor, 12);
    assert_eq!(unit.cells.len(), 2);
}

#[test]
fn test_building_floor_count_mismatch() {
    let mut block = base_block("Building");
    block.set_coords("coords", vec![Coord::new(3, 4), Coord::new(3, 5)]);
    block.set_ints("floors", vec![2]);
    block.set_ints("cf", vec![15, 12]);
    assert!(matches!(
        load_unit(&block, &catalog()).unwrap_err(),
        LoadError::InvalidShape { .. }
    ));
}

// --- Round trips ---

#[test]
fn test_aero_round_trip() {
    let first = load_unit(&aero_block(), &catalog()).unwrap();
    let reloaded = load_unit(&encode_unit(&first).unwrap(), &catalog()).unwrap();

    assert_eq!(reloaded.chassis, first.chassis);
    assert_eq!(reloaded.weight, first.weight);
    assert_eq!(reloaded.movement_points, first.movement_points);
    assert_eq!(reloaded.engine, first.engine);
    assert_eq!(reloaded.armor, first.armor);
    assert_eq!(reloaded.armor_tonnage, first.armor_tonnage);
    for (a, b) in first.locations.iter().zip(&reloaded.locations) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.armor, b.armor);
        assert_eq!(a.mounts.len(), b.mounts.len());
        for (ma, mb) in a.mounts.iter().zip(&b.mounts) {
            assert_eq!(ma.equipment.name, mb.equipment.name);
            assert_eq!(ma.rear, mb.rear);
            assert_eq!(ma.facing, mb.facing);
            assert_eq!(ma.size, mb.size);
        }
    }
}

#[test]
fn test_support_tank_round_trip() {
    let first = load_unit(&support_tank_block(), &catalog()).unwrap();
    let reloaded = load_unit(&encode_unit(&first).unwrap(), &catalog()).unwrap();

    assert_eq!(reloaded.motion, first.motion);
    assert_eq!(reloaded.engine, first.engine);
    assert_eq!(reloaded.transporters, first.transporters);
    assert_eq!(reloaded.quirks, first.quirks);
    assert_eq!(reloaded.no_turret, first.no_turret);
    assert_eq!(reloaded.locations.len(), first.locations.len());
    for (a, b) in first.locations.iter().zip(&reloaded.locations) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.armor, b.armor);
        assert_eq!(a.internal, b.internal);
        for (ma, mb) in a.mounts.iter().zip(&b.mounts) {
            assert_eq!(ma.equipment.name, mb.equipment.name);
            assert_eq!(ma.rear, mb.rear);
            assert_eq!(ma.facing, mb.facing);
        }
    }
}

#[test]
fn test_encode_unsupported_family() {
    let mut block = base_block("HandheldWeapon");
    block.set_double("tonnage", 5.0);
    block.set_ints("armor", vec![10]);
    let unit = load_unit(&block, &catalog()).unwrap();
    assert!(matches!(
        encode_unit(&unit).unwrap_err(),
        LoadError::InvalidValue { .. }
    ));
}

// --- Token facing sentinel sanity ---

#[test]
fn test_explicit_facing_carries_through() {
    let mut block = support_tank_block();
    block.set_strings("Left Equipment", vec!["Machine Gun(RL)".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();
    let left = unit.location("Left").unwrap();
    assert_eq!(left.mounts[0].facing, 4);

    block.set_strings("Right Equipment", vec!["Machine Gun".into()]);
    let unit = load_unit(&block, &catalog()).unwrap();
    // Plain weapons keep the unset sentinel.
    assert_eq!(unit.location("Right").unwrap().mounts[0].facing, FACING_NONE);
}
