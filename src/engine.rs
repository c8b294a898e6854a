//! Engine rating derivation.
//!
//! Ratings are never read from the block as a literal: they are derived from
//! movement points and tonnage with family-specific formulas. The only
//! exception is the small-craft class, whose format fixes the rating at a
//! constant.

use crate::error::{LoadError, LoadResult};
use crate::unit::MotionType;

/// The small-craft format stores no rating field.
pub const SMALL_CRAFT_ENGINE_RATING: i32 = 400;

/// Ground combat vehicles never rate below this floor.
const GROUND_RATING_FLOOR: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineType {
    #[default]
    Fusion,
    Combustion,
    Light,
    Xl,
    Xxl,
    FuelCell,
    Fission,
    None,
}

impl EngineType {
    /// Fixed type-code table used by the `engine_type` override field.
    pub fn from_code(code: i32) -> LoadResult<Self> {
        match code {
            0 => Ok(Self::Combustion),
            1 => Ok(Self::Fusion),
            2 => Ok(Self::Xl),
            3 => Ok(Self::Xxl),
            4 => Ok(Self::FuelCell),
            5 => Ok(Self::Light),
            6 => Ok(Self::Fission),
            7 => Ok(Self::None),
            other => Err(LoadError::value(format!("unknown engine type code {other}"))),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Combustion => 0,
            Self::Fusion => 1,
            Self::Xl => 2,
            Self::Xxl => 3,
            Self::FuelCell => 4,
            Self::Light => 5,
            Self::Fission => 6,
            Self::None => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineFlags {
    pub clan: bool,
    pub tank: bool,
    pub support_vehicle: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSpec {
    pub rating: i32,
    pub engine_type: EngineType,
    pub flags: EngineFlags,
}

impl EngineSpec {
    /// Sentinel spec for units that declare no propulsion.
    pub fn unpowered() -> Self {
        Self {
            rating: 0,
            engine_type: EngineType::None,
            flags: EngineFlags::default(),
        }
    }
}

/// Standard designs: rating is movement points times tonnage.
pub fn standard_rating(movement_points: i32, weight: f64) -> i32 {
    movement_points * weight as i32
}

/// Ground combat vehicles subtract a suspension factor, floor at 10, and
/// round up to the next multiple of 5 when the offset lands between steps.
pub fn ground_rating(movement_points: i32, weight: f64, motion: MotionType) -> LoadResult<i32> {
    let raw = movement_points * weight as i32 - suspension_factor(motion, weight)?;
    Ok(round_up_to_5(raw.max(GROUND_RATING_FLOOR)))
}

/// Suspension factor by motion type and weight band. Wheeled and tracked
/// designs carry their full engine weight; lift and rotor systems offset it.
pub fn suspension_factor(motion: MotionType, weight: f64) -> LoadResult<i32> {
    let bands: &[(f64, i32)] = match motion {
        MotionType::Hover => &[(10.0, 40), (20.0, 85), (30.0, 130), (40.0, 175), (50.0, 235)],
        MotionType::Vtol => &[(10.0, 50), (20.0, 95), (30.0, 140)],
        MotionType::Wige => &[(15.0, 45), (30.0, 80), (45.0, 120), (80.0, 180)],
        MotionType::Wheeled | MotionType::Tracked | MotionType::Naval => return Ok(0),
        MotionType::Aerodyne | MotionType::Spheroid | MotionType::Walker | MotionType::Fixed => {
            return Err(LoadError::value(format!(
                "{motion:?} units do not use a ground engine rating"
            )));
        }
    };
    bands
        .iter()
        .find(|(max, _)| weight <= *max)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| {
            LoadError::value(format!(
                "{weight} tons is too heavy for {motion:?} suspension"
            ))
        })
}

fn round_up_to_5(rating: i32) -> i32 {
    (rating + 4) / 5 * 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rating() {
        assert_eq!(standard_rating(6, 50.0), 300);
    }

    #[test]
    fn test_ground_rating_subtracts_suspension() {
        // 5 * 50 - 235 = 15, already a multiple of 5.
        assert_eq!(ground_rating(5, 50.0, MotionType::Hover).unwrap(), 15);
    }

    #[test]
    fn test_ground_rating_rounds_up() {
        // 4 * 28 - 130 = -18 -> floored to 10; 7 * 28 - 130 = 66 -> 70.
        assert_eq!(ground_rating(4, 28.0, MotionType::Hover).unwrap(), 10);
        assert_eq!(ground_rating(7, 28.0, MotionType::Hover).unwrap(), 70);
    }

    #[test]
    fn test_ground_rating_floor() {
        assert_eq!(ground_rating(1, 10.0, MotionType::Hover).unwrap(), 10);
    }

    #[test]
    fn test_wheeled_has_no_suspension_factor() {
        assert_eq!(suspension_factor(MotionType::Wheeled, 40.0).unwrap(), 0);
        assert_eq!(ground_rating(4, 40.0, MotionType::Tracked).unwrap(), 160);
    }

    #[test]
    fn test_overweight_hover_rejected() {
        let err = suspension_factor(MotionType::Hover, 60.0).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_engine_type_codes_round_trip() {
        for code in 0..=7 {
            let ty = EngineType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert!(EngineType::from_code(42).is_err());
    }
}
