//! Typed projections from a parsed [`Record`].
//!
//! Parsing never fails because a field is absent; callers that need specific
//! fields project them out here and get `MissingRequiredField` or
//! `FieldTypeMismatch` instead.

use crate::decoder::parse_top_level_record;
use crate::error::{ParseError, Result};
use crate::types::{Record, Value};

impl Record {
    /// Look up a field that must be present.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| ParseError::MissingRequiredField {
                field: name.to_string(),
            })
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "string", value))
    }

    pub fn require_int(&self, name: &str) -> Result<i64> {
        let value = self.require(name)?;
        value
            .as_integer()
            .ok_or_else(|| mismatch(name, "integer", value))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool> {
        let value = self.require(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, "boolean", value))
    }

    pub fn require_record(&self, name: &str) -> Result<&Record> {
        let value = self.require(name)?;
        value
            .as_record()
            .ok_or_else(|| mismatch(name, "record", value))
    }
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> ParseError {
    ParseError::FieldTypeMismatch {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

/// The record returned by the demo component's `get-animal` export.
///
/// ```
/// use wave_core::Animal;
///
/// let rex = Animal::from_wave(
///     r#"(record (name "Rex") (species "Dog") (age 3) (is-mammal true))"#,
/// )
/// .unwrap();
/// assert_eq!(rex.name, "Rex");
/// assert!(rex.is_mammal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    pub name: String,
    pub species: String,
    pub age: i64,
    pub is_mammal: bool,
}

impl Animal {
    /// Field names, in the order the export prints them.
    pub const FIELDS: [&'static str; 4] = ["name", "species", "age", "is-mammal"];

    /// Project an animal out of a record. Extra fields are ignored.
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.require_str("name")?.to_string(),
            species: record.require_str("species")?.to_string(),
            age: record.require_int("age")?,
            is_mammal: record.require_bool("is-mammal")?,
        })
    }

    /// Parse WAVE text and project it in one step.
    pub fn from_wave(text: &str) -> Result<Self> {
        Self::from_record(&parse_top_level_record(text)?)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name", self.name.as_str());
        record.insert("species", self.species.as_str());
        record.insert("age", self.age);
        record.insert("is-mammal", self.is_mammal);
        record
    }
}

impl TryFrom<&Record> for Animal {
    type Error = ParseError;

    fn try_from(record: &Record) -> Result<Self> {
        Self::from_record(record)
    }
}
