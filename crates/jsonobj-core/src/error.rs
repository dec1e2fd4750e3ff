//! Error types for jsonobj parsing, merging, and conversion.
//!
//! Most malformed input never reaches this type: the lenient parser degrades
//! bad nodes to `Null` and keeps going. Only the top level of
//! [`try_parse`](crate::parser::try_parse), array-length merge conflicts, and
//! serde conversions report errors.

use thiserror::Error;

/// Errors that can occur while parsing, merging, or converting documents.
#[derive(Error, Debug)]
pub enum JsonObjError {
    /// Strict parsing requires the document to start with `[` or `{`.
    #[error("strict parse error: document must start with '[' or '{{', found {found:?}")]
    StrictRoot { found: char },

    /// A bare literal was neither a keyword, a quoted string, nor a number.
    #[error("invalid numeric literal: {literal}")]
    InvalidNumber { literal: String },

    /// Merge cannot grow an array; the override had more elements than the base.
    #[error("cannot merge arrays: right has {right} elements but left has only {left}")]
    MergeLengthMismatch { left: usize, right: usize },

    /// Conversion to or from `serde_json` failed.
    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout jsonobj-core.
pub type Result<T> = std::result::Result<T, JsonObjError>;
