//! # wave-core
//!
//! Parser, canonical writer and typed projections for **WAVE-style values**:
//! the parenthesized text a WebAssembly runtime prints when it invokes a
//! component export, e.g.
//!
//! ```text
//! (record (name "Rex") (species "Dog") (age 3) (is-mammal true))
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use wave_core::{parse, to_wave, Value};
//!
//! let text = r#"(record (name "Rex") (species "Dog") (age 3) (is-mammal true))"#;
//! let value = parse(text).unwrap();
//!
//! let record = value.as_record().unwrap();
//! assert_eq!(record.get("age"), Some(&Value::Integer(3)));
//!
//! // Value → canonical text (roundtrip)
//! assert_eq!(to_wave(&value), text);
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — WAVE text → [`Value`] (recursive descent)
//! - [`encoder`] — [`Value`] → canonical WAVE text
//! - [`json`] — conversions to and from `serde_json::Value`
//! - [`project`] — required-field accessors and the [`Animal`] projection
//! - [`error`] — [`ParseError`] and its byte [`Span`]s
//! - [`types`] — the [`Value`] / [`Record`] model
//!
//! Every entry point is a pure function over its input: no global state, no
//! I/O, no logging. Parsed values are `Send + Sync` and owned by the caller.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod project;
pub mod types;

pub use decoder::{parse, parse_top_level_record, MAX_DEPTH};
pub use encoder::to_wave;
pub use error::{ParseError, Result, Span};
pub use json::{decode, encode, from_json, to_json};
pub use project::Animal;
pub use types::{is_field_name, Record, Value};
