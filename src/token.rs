//! Lexical parser for the equipment-slot mini-language.
//!
//! One slot string carries up to four markers around the equipment name:
//!
//! ```text
//! slot := ["(R) "] name [":SIZE:" float] (facing-suffix | ammo-suffix)?
//! facing-suffix := "(FL)" | "(FR)" | "(RL)" | "(RR)"
//! ammo-suffix   := " (" integer ")"
//! ```
//!
//! Each step strips its marker from the working string before the next runs,
//! so order matters: size, rear prefix, facing, then (proto-class only) the
//! ammo shot count. Name resolution against the catalog happens afterwards
//! in `mounts`.

use crate::error::{LoadError, LoadResult};

/// Facing sentinel for "no explicit facing".
pub const FACING_NONE: i8 = -1;

const SIZE_MARKER: &str = ":size:";
const REAR_PREFIX: &str = "(R) ";

/// Facing suffixes and the fixed facing index each maps to.
const FACING_SUFFIXES: [(&str, i8); 4] = [("(fl)", 5), ("(fr)", 1), ("(rl)", 4), ("(rr)", 2)];

/// Whether the owning family reads a trailing ` (N)` ammo shot count.
/// Only proto-class units do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoSuffix {
    None,
    Trailing,
}

/// The decoded pieces of one slot string, before catalog resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenParts {
    pub name: String,
    pub size: Option<f64>,
    pub rear: bool,
    pub facing: i8,
    pub shots: Option<u32>,
}

pub fn parse_token(raw: &str, ammo: AmmoSuffix) -> LoadResult<TokenParts> {
    let mut working = raw.trim().to_string();

    let size = strip_size(&mut working, raw)?;

    let rear = working.starts_with(REAR_PREFIX);
    if rear {
        working.drain(..REAR_PREFIX.len());
    }

    let facing = strip_facing(&mut working);

    let shots = match ammo {
        AmmoSuffix::Trailing => strip_shots(&mut working, raw)?,
        AmmoSuffix::None => None,
    };

    Ok(TokenParts {
        name: working.trim().to_string(),
        size,
        rear,
        facing,
        shots,
    })
}

/// Locate `":SIZE:"` case-insensitively and consume the number that follows.
/// Anything after the number (a facing suffix, typically) is retained for
/// the later steps.
fn strip_size(working: &mut String, raw: &str) -> LoadResult<Option<f64>> {
    let lower = working.to_ascii_lowercase();
    let Some(idx) = lower.find(SIZE_MARKER) else {
        return Ok(None);
    };

    let tail = &working[idx + SIZE_MARKER.len()..];
    let digits = tail
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .count();
    let size: f64 = tail[..digits].parse().map_err(|_| {
        LoadError::value(format!("bad size suffix in equipment token {raw:?}"))
    })?;

    let rest = tail[digits..].to_string();
    working.truncate(idx);
    working.push_str(&rest);
    Ok(Some(size))
}

fn strip_facing(working: &mut String) -> i8 {
    let lower = working.to_ascii_lowercase();
    for (suffix, facing) in FACING_SUFFIXES {
        if lower.ends_with(suffix) {
            working.truncate(working.len() - suffix.len());
            let trimmed = working.trim_end().len();
            working.truncate(trimmed);
            return facing;
        }
    }
    FACING_NONE
}

/// Rightmost trailing ` (N)` group. When present it must be a non-negative
/// integer; anything else fails the whole token.
fn strip_shots(working: &mut String, raw: &str) -> LoadResult<Option<u32>> {
    if !working.ends_with(')') {
        return Ok(None);
    }
    let Some(open) = working.rfind(" (") else {
        return Ok(None);
    };

    let inner = &working[open + 2..working.len() - 1];
    let shots: u32 = inner.parse().map_err(|_| {
        LoadError::value(format!(
            "bad ammo shot count {inner:?} in equipment token {raw:?}"
        ))
    })?;

    working.truncate(open);
    Ok(Some(shots))
}
