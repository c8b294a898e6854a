//! The populated unit record and its component types.
//!
//! A `UnitRecord` is constructed once per load call by the owning assembler
//! and handed to the caller complete, or discarded on the first fatal
//! validation failure. Callers never see a partially-built record.

use std::sync::Arc;

use bon::Builder;

use crate::armor::{
    AERO_FIGHTER, GUN_EMPLACEMENT, HANDHELD_WEAPON, LARGE_SUPPORT_TANK, PROTO, SMALL_CRAFT,
    SUPPORT_TANK, Topology, VTOL,
};
use crate::catalog::EquipmentDef;
use crate::engine::EngineSpec;
use crate::error::{LoadError, LoadResult};

/// Unit family discriminator. Each family has its own location topology and
/// field contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitFamily {
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

impl UnitFamily {
    /// Map the block's `unittype` discriminator string to a family.
    pub fn from_discriminator(value: &str) -> LoadResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "aerofighter" | "aero" => Ok(Self::AeroFighter),
            "protomek" | "proto" => Ok(Self::Proto),
            "smallcraft" => Ok(Self::SmallCraft),
            "supporttank" => Ok(Self::SupportTank),
            "largesupporttank" => Ok(Self::LargeSupportTank),
            "supportvtol" | "vtol" => Ok(Self::Vtol),
            "gunemplacement" => Ok(Self::GunEmplacement),
            "handheldweapon" | "handheld" => Ok(Self::HandheldWeapon),
            "building" => Ok(Self::Building),
            other => Err(LoadError::value(format!("unknown unit type {other:?}"))),
        }
    }

    pub fn discriminator(self) -> &'static str {
        match self {
            Self::AeroFighter => "AeroFighter",
            Self::Proto => "ProtoMek",
            Self::SmallCraft => "SmallCraft",
            Self::SupportTank => "SupportTank",
            Self::LargeSupportTank => "LargeSupportTank",
            Self::Vtol => "SupportVTOL",
            Self::GunEmplacement => "GunEmplacement",
            Self::HandheldWeapon => "HandheldWeapon",
            Self::Building => "Building",
        }
    }

    /// The family's fixed location layout. Buildings have no fixed topology;
    /// their locations are derived per coordinate and floor.
    pub fn topology(self) -> Option<&'static Topology> {
        match self {
            Self::AeroFighter => Some(&AERO_FIGHTER),
            Self::Proto => Some(&PROTO),
            Self::SmallCraft => Some(&SMALL_CRAFT),
            Self::SupportTank => Some(&SUPPORT_TANK),
            Self::LargeSupportTank => Some(&LARGE_SUPPORT_TANK),
            Self::Vtol => Some(&VTOL),
            Self::GunEmplacement => Some(&GUN_EMPLACEMENT),
            Self::HandheldWeapon => Some(&HANDHELD_WEAPON),
            Self::Building => None,
        }
    }
}

/// Tech base, which doubles as the equipment-name prefix during catalog
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechBase {
    InnerSphere,
    Clan,
}

impl TechBase {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::InnerSphere => "IS ",
            Self::Clan => "Clan ",
        }
    }
}

/// Movement mode, parsed from the `motion_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionType {
    Wheeled,
    Tracked,
    Hover,
    Vtol,
    Naval,
    Wige,
    Aerodyne,
    Spheroid,
    /// Legged proto-class units.
    Walker,
    /// Immobile units (gun emplacements, buildings, hand-held weapons).
    Fixed,
}

impl MotionType {
    pub fn parse(value: &str) -> LoadResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wheeled" => Ok(Self::Wheeled),
            "tracked" => Ok(Self::Tracked),
            "hover" => Ok(Self::Hover),
            "vtol" => Ok(Self::Vtol),
            "naval" => Ok(Self::Naval),
            "wige" => Ok(Self::Wige),
            "aerodyne" => Ok(Self::Aerodyne),
            "spheroid" => Ok(Self::Spheroid),
            "walker" | "biped" => Ok(Self::Walker),
            "none" => Ok(Self::Fixed),
            other => Err(LoadError::value(format!("bad movement type {other:?}"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wheeled => "Wheeled",
            Self::Tracked => "Tracked",
            Self::Hover => "Hover",
            Self::Vtol => "VTOL",
            Self::Naval => "Naval",
            Self::Wige => "WiGE",
            Self::Aerodyne => "Aerodyne",
            Self::Spheroid => "Spheroid",
            Self::Walker => "Walker",
            Self::Fixed => "None",
        }
    }
}

/// An equipment instance bound to a location, with its slot-string
/// modifiers applied.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquipmentMount {
    pub equipment: Arc<EquipmentDef>,
    /// Index into the record's `locations`.
    pub location: usize,
    pub rear: bool,
    /// Facing index, or `token::FACING_NONE` when unset.
    pub facing: i8,
    pub size: Option<f64>,
    pub shots: Option<u32>,
}

/// One location of the unit: armor, internal structure, and the ordered
/// equipment mounted there.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocationSlot {
    pub name: String,
    pub armor: i32,
    pub internal: i32,
    /// Aerospace damage threshold; zero for non-aerospace families.
    pub threshold: i32,
    pub mounts: Vec<EquipmentMount>,
    /// Remaining-capacity accounting; `None` = unbounded.
    pub slot_capacity: Option<u8>,
}

impl LocationSlot {
    pub fn new(name: impl Into<String>, slot_capacity: Option<u8>) -> Self {
        Self {
            name: name.into(),
            armor: 0,
            internal: 0,
            threshold: 0,
            mounts: Vec::new(),
            slot_capacity,
        }
    }

    fn slots_used(&self) -> u32 {
        self.mounts.iter().map(|m| u32::from(m.equipment.slots)).sum()
    }

    /// Mount equipment here, enforcing slot capacity. The error string is
    /// the underlying placement failure; callers wrap it with the token
    /// that was being placed.
    pub fn try_mount(&mut self, mount: EquipmentMount) -> Result<(), String> {
        if let Some(capacity) = self.slot_capacity {
            let needed = u32::from(mount.equipment.slots);
            if self.slots_used() + needed > u32::from(capacity) {
                return Err(format!(
                    "location {} is full ({} of {} slots used)",
                    self.name,
                    self.slots_used(),
                    capacity
                ));
            }
        }
        self.mounts.push(mount);
        Ok(())
    }
}

/// Armor system identity plus the per-location values after decoding.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorSpec {
    pub type_id: i32,
    pub tech_level: i32,
    pub per_location: Vec<i32>,
}

/// A transport capacity parsed from a colon-delimited descriptor string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transporter {
    TroopSpace { tons: f64 },
    CargoBay { tons: f64, doors: u32 },
}

/// An equipment token that resolved to nothing. Non-fatal: recorded against
/// the unit and surfaced to the caller after a successful load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnresolvedEquipment {
    pub location: String,
    pub raw: String,
}

/// A fully validated unit. Built by the owning assembler in one builder
/// expression after every field has passed validation.
#[derive(Debug, Clone, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnitRecord {
    pub family: UnitFamily,
    #[builder(into)]
    pub chassis: String,
    #[builder(into, default)]
    pub model: String,
    pub year: i32,
    #[builder(into, default)]
    pub source: String,
    pub tech_base: TechBase,
    pub weight: f64,
    pub motion: MotionType,
    #[builder(default)]
    pub movement_points: i32,
    pub locations: Vec<LocationSlot>,
    pub engine: EngineSpec,
    #[builder(default)]
    pub armor: ArmorSpec,
    /// Tons of armor, recomputed from the summed per-location values.
    #[builder(default)]
    pub armor_tonnage: f64,
    /// Aerospace structural integrity; `None` for ground families.
    pub structural_integrity: Option<i32>,
    #[builder(default)]
    pub transporters: Vec<Transporter>,
    #[builder(default)]
    pub omni: bool,
    #[builder(default)]
    pub vstol: bool,
    /// Set when the armor array used a short form that drops the turret.
    #[builder(default)]
    pub no_turret: bool,
    #[builder(default)]
    pub quirks: Vec<String>,
    /// Spatial cells occupied by structure/building units; empty for every
    /// other family.
    #[builder(default)]
    pub cells: Vec<crate::block::Coord>,
    #[builder(default)]
    pub unresolved: Vec<UnresolvedEquipment>,
}

impl UnitRecord {
    pub fn location(&self, name: &str) -> Option<&LocationSlot> {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Total armor points across locations.
    pub fn armor_points(&self) -> i32 {
        self.locations.iter().map(|l| l.armor).sum()
    }
}
