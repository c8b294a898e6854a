//! Declarative per-family field contracts.
//!
//! The file grammar signals optionality by omission, which historically
//! produced long chains of existence checks in every loader. Each family
//! instead declares its contract as a static table; one generic routine
//! checks presence of required fields and that every present field reads as
//! the declared type, before the family's assembly sequence runs.

use crate::block::Block;
use crate::error::{LoadError, LoadResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Double,
    Str,
    IntArray,
    StrArray,
    Coords,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

pub const fn required(key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        kind,
        required: true,
    }
}

pub const fn optional(key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        kind,
        required: false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldContract {
    pub family: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldContract {
    /// Presence check for required fields, type check for present ones.
    /// Runs before the family's assembly sequence so later steps can read
    /// without re-validating.
    pub fn check(&self, block: &Block) -> LoadResult<()> {
        for spec in self.fields {
            if !block.exists(spec.key) {
                if spec.required {
                    return Err(LoadError::missing(spec.key));
                }
                continue;
            }
            match spec.kind {
                FieldKind::Int => block.int(spec.key).map(|_| ())?,
                FieldKind::Double => block.double(spec.key).map(|_| ())?,
                FieldKind::Str => block.string(spec.key).map(|_| ())?,
                FieldKind::IntArray => block.ints(spec.key).map(|_| ())?,
                FieldKind::StrArray => block.strings(spec.key).map(|_| ())?,
                FieldKind::Coords => block.coords(spec.key).map(|_| ())?,
            }
        }
        Ok(())
    }
}
