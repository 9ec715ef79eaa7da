//! JSON bridge: convert between parsed WAVE values and `serde_json::Value`.
//!
//! Records become objects (field order preserved through serde_json's
//! `preserve_order` feature), strings, integers and booleans map one-to-one.
//! The reverse direction only accepts JSON that has a WAVE counterpart:
//! objects with field-name keys, non-negative integers that fit in `i64`,
//! strings and booleans.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number};

use crate::decoder::parse;
use crate::encoder::to_wave;
use crate::error::{ParseError, Result};
use crate::types::{is_field_name, Record, Value};

/// Decode WAVE text into compact JSON.
///
/// ```
/// let json = wave_core::decode(r#"(record (name "Rex") (is-mammal true))"#).unwrap();
/// assert_eq!(json, r#"{"name":"Rex","is-mammal":true}"#);
/// ```
pub fn decode(wave: &str) -> Result<String> {
    let value = parse(wave)?;
    Ok(serde_json::to_string(&value)?)
}

/// Encode a JSON document as canonical WAVE text.
///
/// ```
/// let wave = wave_core::encode(r#"{"name":"Rex","age":3}"#).unwrap();
/// assert_eq!(wave, r#"(record (name "Rex") (age 3))"#);
/// ```
pub fn encode(json: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(json)?;
    Ok(to_wave(&from_json(&json)?))
}

/// Convert a parsed value into a JSON value.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(n) => serde_json::Value::Number(Number::from(*n)),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Record(record) => {
            let map: Map<String, serde_json::Value> = record
                .iter()
                .map(|(k, v)| (k.to_string(), to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Convert a JSON value into a WAVE value.
///
/// Errors name the offending location as a JSON path (`$.owner.age`).
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
    convert(json, &mut String::from("$"))
}

fn convert(json: &serde_json::Value, path: &mut String) -> Result<Value> {
    match json {
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) if i >= 0 => Ok(Value::Integer(i)),
            Some(_) => Err(unsupported(path, "negative integers are not representable")),
            None if n.is_u64() => Err(unsupported(path, "integer does not fit in 64 bits")),
            None => Err(unsupported(path, "floating-point numbers are not representable")),
        },
        serde_json::Value::Null => Err(unsupported(path, "null is not representable")),
        serde_json::Value::Array(_) => Err(unsupported(path, "arrays are not representable")),
        serde_json::Value::Object(map) => {
            let mut record = Record::new();
            for (key, child) in map {
                if !is_field_name(key) {
                    return Err(unsupported(
                        path,
                        &format!("key `{key}` does not match [a-z][a-z-]*"),
                    ));
                }
                let len = path.len();
                path.push('.');
                path.push_str(key);
                let value = convert(child, path)?;
                path.truncate(len);
                record.insert(key.clone(), value);
            }
            Ok(Value::Record(record))
        }
    }
}

fn unsupported(path: &str, reason: &str) -> ParseError {
    ParseError::UnsupportedJson {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
