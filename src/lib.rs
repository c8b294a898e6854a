//! Loader for flat key/block combat-unit definition files.
//!
//! Converts the loose, versioned key/block text grammar into strongly
//! validated in-memory unit records. The hard parts live here: the
//! equipment-token mini-language (size suffix, rear-mount prefix, facing
//! suffix, ammo shot count, legacy aliasing), the per-family armor-array
//! topology rules, and the engine-rating formulas. Equipment behavior,
//! simulation rules, and the on-disk reader/writer are external
//! collaborators.
//!
//! Each load call is a pure function of one immutable [`block::Block`] to
//! one [`unit::UnitRecord`] or a single fatal [`error::LoadError`]; loads
//! may run concurrently against a shared catalog.

/// Location topologies and armor-array decoding.
pub mod armor;
/// Per-unit-family assemblers and dispatch.
pub mod assemble;
/// The in-memory block and its typed field accessors.
pub mod block;
/// Equipment catalog surface and legacy tables.
pub mod catalog;
/// Engine rating derivation.
pub mod engine;
/// Error definitions.
pub mod error;
/// Equipment token resolution and placement.
pub mod mounts;
/// Lexical parser for the equipment-slot mini-language.
pub mod token;
/// The populated unit record.
pub mod unit;

pub use assemble::encode::encode_unit;
pub use assemble::load_unit;
pub use error::{LoadError, LoadResult};
