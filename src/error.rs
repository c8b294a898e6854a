//! Error definitions for unit loading.
//!
//! Every fatal condition aborts the whole load and surfaces exactly one
//! `LoadError`; no partially-built record is ever returned. Unresolved
//! equipment names are deliberately *not* represented here -- they accumulate
//! on the in-progress record as diagnostics (see `unit::UnresolvedEquipment`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid shape: {detail}")]
    InvalidShape { detail: String },

    #[error("invalid value: {detail}")]
    InvalidValue { detail: String },

    #[error("could not place equipment: {detail}")]
    Placement { detail: String },
}

impl LoadError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn shape(detail: impl Into<String>) -> Self {
        Self::InvalidShape {
            detail: detail.into(),
        }
    }

    pub fn value(detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            detail: detail.into(),
        }
    }

    pub fn placement(detail: impl Into<String>) -> Self {
        Self::Placement {
            detail: detail.into(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
