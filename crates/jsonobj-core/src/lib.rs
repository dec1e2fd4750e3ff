//! # jsonobj-core
//!
//! A mutable, insertion-ordered JSON document model built for telemetry
//! payloads: event construction, query serialization, and server response
//! parsing all go through the single [`Value`] node type.
//!
//! The wire format is JSON with two deliberate deviations that existing
//! producers and consumers rely on:
//!
//! - non-finite floats are written as the quoted tokens `"INFINITY"`,
//!   `"NEGINFINITY"` and `"NaN"`;
//! - string contents are written and read verbatim, without escaping.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonobj_core::{parse, print, Value};
//!
//! let mut doc = parse(r#"{"a":1,"b":[true,false,null]}"#);
//! doc.add_field("c", Value::vector3(1.5, -2.5, 0.0));
//! assert_eq!(doc.get_or("a", 0i32), 1);
//! assert_eq!(
//!     print(&doc, false),
//!     r#"{"a":1,"b":[true,false,null],"c":{"x":1.5,"y":-2.5,"z":0.0}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`] - the [`Value`] sum type, constructors, mutation, and field access
//! - [`parser`] - depth-bounded text → [`Value`] parsing ([`ParseOptions`])
//! - [`printer`] - eager [`Value`] → text serialization
//! - [`cooperative`] - time-sliced serialization ([`PrintTask`])
//! - [`merge`] - [`Value::merge`]
//! - [`interop`] - `serde` / `serde_json` conversions
//! - [`error`] - [`JsonObjError`]

pub mod cooperative;
pub mod error;
pub mod interop;
pub mod merge;
pub mod parser;
pub mod printer;
pub mod value;

pub use cooperative::{PrintTask, Progress, SliceBudget, DEFAULT_SLICE};
pub use error::{JsonObjError, Result};
pub use parser::{parse, parse_with, try_parse, ParseOptions, MAX_DEPTH};
pub use printer::print;
pub use value::{FromField, Kind, Number, Value};
