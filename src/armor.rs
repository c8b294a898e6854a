//! Location topologies and armor-array decoding.
//!
//! Each unit family has a fixed, ordered set of named locations. The block
//! stores armor as one flat integer array covering those locations, with two
//! legacy short forms: one value short means the unit has no turret, two
//! short (families with a secondary turret) means no turret at all. A
//! body/core location is never stored; when the family has one it is
//! synthesized with armor 0 and prepended.

use itertools::Itertools;

use crate::error::{LoadError, LoadResult};

/// One named location and its equipment-slot capacity (`None` = unbounded).
#[derive(Debug, Clone, Copy)]
pub struct LocationDef {
    pub name: &'static str,
    pub slots: Option<u8>,
}

const fn loc(name: &'static str, slots: Option<u8>) -> LocationDef {
    LocationDef { name, slots }
}

/// A family's fixed location layout.
#[derive(Debug, Clone, Copy)]
pub struct Topology {
    pub family: &'static str,
    pub locations: &'static [LocationDef],
    /// Index of the synthesized body/core location, absent from the stored
    /// armor array.
    pub body: Option<usize>,
    /// Index of the (primary) turret-like optional location.
    pub turret: Option<usize>,
    /// Index of the secondary turret, for families that allow two.
    pub rear_turret: Option<usize>,
}

/// The outcome of decoding one armor array: which topology locations the
/// unit actually has (in topology order) and the armor value assigned to
/// each. `locations` and `values` are always the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedArmor {
    pub locations: Vec<usize>,
    pub values: Vec<i32>,
}

impl DecodedArmor {
    /// True when the stored array used a short form that drops the turret.
    pub fn turret_omitted(&self, topology: &Topology) -> bool {
        topology
            .turret
            .is_some_and(|t| !self.locations.contains(&t))
    }
}

impl Topology {
    /// Stored-array length for the full topology (body is never stored).
    pub fn stored_len(&self) -> usize {
        self.locations.len() - usize::from(self.body.is_some())
    }

    pub fn location_name(&self, index: usize) -> &'static str {
        self.locations[index].name
    }

    /// Map a flat armor array onto this topology, inferring which optional
    /// locations the unit has from the array length.
    pub fn decode_armor(&self, stored: &[i32]) -> LoadResult<DecodedArmor> {
        let full = self.stored_len();
        let mut skip: Vec<usize> = Vec::new();
        if stored.len() + 1 == full {
            // One short: no secondary turret if the family has one, else no
            // turret.
            match self.rear_turret.or(self.turret) {
                Some(index) => skip.push(index),
                None => return Err(self.shape_error(stored.len())),
            }
        } else if stored.len() + 2 == full {
            match (self.turret, self.rear_turret) {
                (Some(turret), Some(rear)) => skip.extend([turret, rear]),
                _ => return Err(self.shape_error(stored.len())),
            }
        } else if stored.len() != full {
            return Err(self.shape_error(stored.len()));
        }

        if let Some(bad) = stored.iter().find(|&&v| v < 0) {
            return Err(LoadError::value(format!(
                "negative armor value {bad} in {} armor array",
                self.family
            )));
        }

        let mut locations = Vec::with_capacity(self.locations.len());
        let mut values = Vec::with_capacity(self.locations.len());
        let mut stored_iter = stored.iter();
        for (index, _) in self.locations.iter().enumerate() {
            if skip.contains(&index) {
                continue;
            }
            locations.push(index);
            if Some(index) == self.body {
                values.push(0);
            } else {
                // Lengths were checked above; every non-skipped,
                // non-body location has a stored value.
                values.push(*stored_iter.next().unwrap());
            }
        }
        Ok(DecodedArmor { locations, values })
    }

    fn shape_error(&self, got: usize) -> LoadError {
        LoadError::shape(format!(
            "armor array of length {got} does not fit a {} (expected {})",
            self.family,
            self.accepted_lengths(),
        ))
    }

    fn accepted_lengths(&self) -> String {
        let full = self.stored_len();
        let mut accepted = vec![full];
        if self.turret.is_some() {
            accepted.push(full - 1);
        }
        if self.rear_turret.is_some() {
            accepted.push(full - 2);
        }
        accepted.iter().map(usize::to_string).join(" or ")
    }
}

// --- Family topologies ---

pub static AERO_FIGHTER: Topology = Topology {
    family: "aerospace fighter",
    locations: &[
        loc("Fuselage", None),
        loc("Nose", None),
        loc("Right Wing", None),
        loc("Left Wing", None),
        loc("Aft", None),
    ],
    body: Some(0),
    turret: None,
    rear_turret: None,
};

pub static SMALL_CRAFT: Topology = Topology {
    family: "small craft",
    locations: &[
        loc("Fuselage", None),
        loc("Nose", None),
        loc("Right Side", None),
        loc("Left Side", None),
        loc("Aft", None),
    ],
    body: Some(0),
    turret: None,
    rear_turret: None,
};

pub static PROTO: Topology = Topology {
    family: "proto-unit",
    locations: &[
        loc("Torso", Some(2)),
        loc("Head", Some(1)),
        loc("Right Arm", Some(1)),
        loc("Left Arm", Some(1)),
        loc("Legs", Some(1)),
        loc("Main Gun", Some(1)),
    ],
    body: None,
    turret: Some(5),
    rear_turret: None,
};

pub static SUPPORT_TANK: Topology = Topology {
    family: "support tank",
    locations: &[
        loc("Body", None),
        loc("Front", None),
        loc("Right", None),
        loc("Left", None),
        loc("Rear", None),
        loc("Turret", None),
        loc("Rear Turret", None),
    ],
    body: Some(0),
    turret: Some(5),
    rear_turret: Some(6),
};

pub static LARGE_SUPPORT_TANK: Topology = Topology {
    family: "large support tank",
    locations: &[
        loc("Body", None),
        loc("Front", None),
        loc("Front Right", None),
        loc("Front Left", None),
        loc("Rear Right", None),
        loc("Rear Left", None),
        loc("Rear", None),
        loc("Turret", None),
        loc("Rear Turret", None),
    ],
    body: Some(0),
    turret: Some(7),
    rear_turret: Some(8),
};

pub static VTOL: Topology = Topology {
    family: "VTOL",
    locations: &[
        loc("Body", None),
        loc("Front", None),
        loc("Right", None),
        loc("Left", None),
        loc("Rear", None),
        loc("Rotor", None),
        loc("Chin Turret", None),
    ],
    body: Some(0),
    turret: Some(6),
    rear_turret: None,
};

pub static GUN_EMPLACEMENT: Topology = Topology {
    family: "gun emplacement",
    locations: &[loc("Guns", None), loc("Turret", None)],
    body: None,
    turret: Some(1),
    rear_turret: None,
};

pub static HANDHELD_WEAPON: Topology = Topology {
    family: "hand-held weapon",
    locations: &[loc("Gun", None)],
    body: None,
    turret: None,
    rear_turret: None,
};
