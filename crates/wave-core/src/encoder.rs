//! Canonical WAVE writer: [`Value`] → text.
//!
//! The canonical form is what [`parse`](crate::parse) accepts, laid out on one
//! line with single spaces:
//!
//! - records: `(record (name "Rex") (age 3))`, or `(record)` when empty
//! - strings: double-quoted, with `"` and `\` escaped by a backslash
//! - integers: base-10 digits
//! - booleans: `true` / `false`
//!
//! Writing then parsing yields an equal [`Value`] for any value whose field
//! names match `[a-z][a-z-]*` and whose integers are non-negative. Values built
//! by hand outside those limits are written as-is and will not parse back.
//!
//! # Example
//! ```
//! use wave_core::{to_wave, Record, Value};
//!
//! let animal: Record = [("name", Value::from("Rex")), ("age", Value::from(3i64))]
//!     .into_iter()
//!     .collect();
//! assert_eq!(to_wave(&animal.into()), r#"(record (name "Rex") (age 3))"#);
//! ```

use std::fmt;

use crate::types::{Record, Value};

/// Write a value in canonical WAVE form.
pub fn to_wave(value: &Value) -> String {
    let mut out = String::new();
    encode_value(value, &mut out);
    out
}

fn encode_value(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => encode_string(s, out),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Record(record) => encode_record(record, out),
    }
}

fn encode_record(record: &Record, out: &mut String) {
    out.push_str("(record");
    for (name, value) in record.iter() {
        out.push_str(" (");
        out.push_str(name);
        out.push(' ');
        encode_value(value, out);
        out.push(')');
    }
    out.push(')');
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_wave(self))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        encode_record(self, &mut out);
        f.write_str(&out)
    }
}
