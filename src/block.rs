//! In-memory unit-definition block: an ordered set of named fields, each
//! holding a typed array (ints, doubles, strings, or map coordinates).
//!
//! This is the field-accessor surface the assemblers read from. Key lookup is
//! case-insensitive because the file grammar was written by many third
//! parties over decades and capitalization drifted. Blocks are immutable to
//! assemblers; the setters exist for test fixtures and the encode path.

use variantly::Variantly;

use crate::error::{LoadError, LoadResult};

/// A 2D map coordinate used by structure/building blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One field payload. The grammar is largely untyped, so a field is whatever
/// array shape the writer chose; accessors coerce where that is lossless.
#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum FieldValue {
    Ints(Vec<i32>),
    Doubles(Vec<f64>),
    Strings(Vec<String>),
    Coords(Vec<Coord>),
}

/// An insertion-ordered mapping from field name to payload.
#[derive(Debug, Clone, Default)]
pub struct Block {
    fields: Vec<(String, FieldValue)>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    fn set(&mut self, key: &str, value: FieldValue) {
        if let Some(slot) = self
            .fields
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            slot.1 = value;
        } else {
            self.fields.push((key.to_string(), value));
        }
    }

    // --- Typed array views ---

    pub fn ints(&self, key: &str) -> LoadResult<&[i32]> {
        match self.get(key) {
            Some(FieldValue::Ints(v)) => Ok(v),
            Some(other) => Err(LoadError::value(format!(
                "field {key} holds {}, expected integers",
                kind_name(other)
            ))),
            None => Err(LoadError::missing(key)),
        }
    }

    pub fn strings(&self, key: &str) -> LoadResult<&[String]> {
        match self.get(key) {
            Some(FieldValue::Strings(v)) => Ok(v),
            Some(other) => Err(LoadError::value(format!(
                "field {key} holds {}, expected strings",
                kind_name(other)
            ))),
            None => Err(LoadError::missing(key)),
        }
    }

    pub fn coords(&self, key: &str) -> LoadResult<&[Coord]> {
        match self.get(key) {
            Some(FieldValue::Coords(v)) => Ok(v),
            Some(other) => Err(LoadError::value(format!(
                "field {key} holds {}, expected coordinates",
                kind_name(other)
            ))),
            None => Err(LoadError::missing(key)),
        }
    }

    /// Doubles view; an integer field is coerced since writers stored
    /// tonnage both ways.
    pub fn doubles(&self, key: &str) -> LoadResult<Vec<f64>> {
        match self.get(key) {
            Some(FieldValue::Doubles(v)) => Ok(v.clone()),
            Some(FieldValue::Ints(v)) => Ok(v.iter().map(|&i| i as f64).collect()),
            Some(other) => Err(LoadError::value(format!(
                "field {key} holds {}, expected numbers",
                kind_name(other)
            ))),
            None => Err(LoadError::missing(key)),
        }
    }

    // --- Scalar conveniences (first element) ---

    pub fn int(&self, key: &str) -> LoadResult<i32> {
        let v = self.ints(key)?;
        v.first()
            .copied()
            .ok_or_else(|| LoadError::value(format!("field {key} is empty")))
    }

    pub fn double(&self, key: &str) -> LoadResult<f64> {
        let v = self.doubles(key)?;
        v.first()
            .copied()
            .ok_or_else(|| LoadError::value(format!("field {key} is empty")))
    }

    pub fn string(&self, key: &str) -> LoadResult<&str> {
        let v = self.strings(key)?;
        v.first()
            .map(String::as_str)
            .ok_or_else(|| LoadError::value(format!("field {key} is empty")))
    }

    // --- Writers (fixtures and the encode path only) ---

    pub fn set_ints(&mut self, key: &str, values: Vec<i32>) {
        self.set(key, FieldValue::Ints(values));
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set_ints(key, vec![value]);
    }

    pub fn set_doubles(&mut self, key: &str, values: Vec<f64>) {
        self.set(key, FieldValue::Doubles(values));
    }

    pub fn set_double(&mut self, key: &str, value: f64) {
        self.set_doubles(key, vec![value]);
    }

    pub fn set_strings(&mut self, key: &str, values: Vec<String>) {
        self.set(key, FieldValue::Strings(values));
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.set_strings(key, vec![value.to_string()]);
    }

    pub fn set_coords(&mut self, key: &str, values: Vec<Coord>) {
        self.set(key, FieldValue::Coords(values));
    }

    pub fn remove(&mut self, key: &str) {
        self.fields.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }
}

fn kind_name(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Ints(_) => "integers",
        FieldValue::Doubles(_) => "doubles",
        FieldValue::Strings(_) => "strings",
        FieldValue::Coords(_) => "coordinates",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut block = Block::new();
        block.set_double("Tonnage", 50.0);
        assert!(block.exists("tonnage"));
        assert_eq!(block.double("TONNAGE").unwrap(), 50.0);
    }

    #[test]
    fn test_int_field_coerces_to_double() {
        let mut block = Block::new();
        block.set_int("tonnage", 35);
        assert_eq!(block.double("tonnage").unwrap(), 35.0);
    }

    #[test]
    fn test_missing_field() {
        let block = Block::new();
        assert!(matches!(
            block.int("cruiseMP"),
            Err(crate::error::LoadError::MissingField { field }) if field == "cruiseMP"
        ));
    }

    #[test]
    fn test_wrong_type_is_invalid_value() {
        let mut block = Block::new();
        block.set_string("armor", "not numbers");
        assert!(matches!(
            block.ints("armor"),
            Err(crate::error::LoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut block = Block::new();
        block.set_int("year", 3025);
        block.set_int("Year", 3050);
        assert_eq!(block.int("year").unwrap(), 3050);
    }
}
