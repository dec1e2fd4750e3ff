//! Depth-bounded, tokenizer-free parser.
//!
//! Each container is scanned once, left to right, tracking only bracket depth,
//! whether we are inside a quoted string, and (for objects) the most recent
//! key. Element boundaries are commas at depth 0 or the closing bracket; every
//! bounded segment is trimmed and parsed recursively.
//!
//! # Key design decisions
//!
//! - **Lenient by default**: a malformed literal degrades to `Null` with a
//!   warning and its siblings are still parsed. [`try_parse`] reports the
//!   failure instead, but only for the top-level value.
//! - **No unescaping**: string nodes keep the text between the quotes as-is.
//!   A backslash only hides the next character from quote tracking.
//! - **Depth budget**: children at levels `>= max_depth` are dropped, or kept
//!   verbatim as `Baked` nodes when `store_excess_as_raw` is set. A hard cap of
//!   [`MAX_DEPTH`] levels applies even when no budget is given.

use std::convert::Infallible;
use std::str::FromStr;

use crate::error::{JsonObjError, Result};
use crate::value::{Number, Value};

/// Nesting limit shared by the parser and the printers. The parser builds
/// levels below it; the printers emit levels up to and including it.
pub const MAX_DEPTH: usize = 100;

const WHITESPACE: &[char] = &[' ', '\r', '\n', '\t', '\u{FEFF}'];

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Keep only values nested fewer than this many levels below the root.
    /// `None` means unbounded (up to [`MAX_DEPTH`] levels).
    pub max_depth: Option<usize>,
    /// Keep values beyond the depth budget as `Baked` raw text instead of
    /// dropping them.
    pub store_excess_as_raw: bool,
    /// Reject documents whose first character is not `[` or `{`.
    pub strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn store_excess_as_raw(mut self, store: bool) -> Self {
        self.store_excess_as_raw = store;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn keeps_level(&self, level: usize) -> bool {
        level < MAX_DEPTH && self.max_depth.is_none_or(|max| level < max)
    }
}

/// Parse `text` with default options. Never fails; malformed input yields `Null`.
///
/// ```
/// use jsonobj_core::{parse, Kind};
///
/// let doc = parse(r#"{"a":1,"b":[true,null]}"#);
/// assert_eq!(doc.kind(), Kind::Object);
/// assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(parse("not json").kind(), Kind::Null);
/// ```
pub fn parse(text: &str) -> Value {
    parse_with(text, &ParseOptions::default())
}

/// Parse `text` with explicit options, degrading top-level failures to `Null`.
pub fn parse_with(text: &str, options: &ParseOptions) -> Value {
    try_parse(text, options).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "improper JSON formatting; using null");
        Value::Null
    })
}

/// Parse `text`, reporting a malformed top-level value as an error.
///
/// Nested failures are still recovered locally (the child becomes `Null`).
pub fn try_parse(text: &str, options: &ParseOptions) -> Result<Value> {
    parse_node(text, 0, options, options.strict)
}

impl FromStr for Value {
    type Err = Infallible;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        Ok(parse(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

fn parse_node(text: &str, level: usize, options: &ParseOptions, strict: bool) -> Result<Value> {
    let text = text.trim_matches(WHITESPACE);
    let Some(first) = text.chars().next() else {
        return Ok(Value::Null);
    };

    if strict && first != '[' && first != '{' {
        return Err(JsonObjError::StrictRoot { found: first });
    }

    if text.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }
    if let Some(number) = quoted_token(text).and_then(Number::from_token) {
        return Ok(Value::Number(number));
    }

    match first {
        '"' => Ok(Value::String(strip_quotes(text).to_string())),
        '{' => Ok(parse_container(text, Container::Object, level, options)),
        '[' => Ok(parse_container(text, Container::Array, level, options)),
        _ => parse_number(text).map(Value::Number),
    }
}

/// `"TOKEN"` → `TOKEN`, only for a single quoted run with no inner quotes.
fn quoted_token(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    (!inner.contains('"')).then_some(inner)
}

/// Drop exactly one leading and one trailing character.
fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Invariant-culture numeric literal. A literal without `.` also fills the
/// integer payload when it fits in an `i64`.
fn parse_number(literal: &str) -> Result<Number> {
    let invalid = || JsonObjError::InvalidNumber {
        literal: literal.to_string(),
    };
    let numeric_chars = literal
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric_chars {
        return Err(invalid());
    }

    let float: f64 = literal.parse().map_err(|_| invalid())?;
    if literal.contains('.') {
        return Ok(Number::from_f64(float));
    }
    Ok(Number::from_parts(float, literal.parse::<i64>().ok()))
}

fn parse_container(text: &str, container: Container, level: usize, options: &ParseOptions) -> Value {
    let is_object = container == Container::Object;
    let bytes = text.as_bytes();

    let mut items: Vec<Value> = Vec::new();
    let mut entries: Vec<(String, Value)> = Vec::new();

    let mut token_start = 1;
    let mut key = "";
    let mut open_quote = false;
    let mut in_value = false;
    let mut depth: isize = 0;
    let mut offset = 0;

    loop {
        offset += 1;
        if offset >= bytes.len() {
            break;
        }
        let byte = bytes[offset];

        if matches!(byte, b' ' | b'\r' | b'\n' | b'\t') {
            continue;
        }
        if byte == b'\\' {
            offset += 1;
            continue;
        }
        if byte == b'"' {
            if open_quote {
                if !in_value && depth == 0 && is_object {
                    key = &text[token_start + 1..offset];
                }
                open_quote = false;
            } else {
                if depth == 0 && is_object {
                    token_start = offset;
                }
                open_quote = true;
            }
        }
        if open_quote {
            continue;
        }

        if is_object && depth == 0 && byte == b':' {
            token_start = offset + 1;
            in_value = true;
        }

        match byte {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth -= 1,
            _ => {}
        }

        if (byte == b',' && depth == 0) || depth < 0 {
            in_value = false;
            let segment = text[token_start..offset].trim_matches(WHITESPACE);
            if !segment.is_empty() {
                if let Some(child) = parse_child(segment, level + 1, options) {
                    if is_object {
                        entries.push((key.to_string(), child));
                    } else {
                        items.push(child);
                    }
                }
            }
            token_start = offset + 1;
            // the container's own closing bracket; trailing bytes are ignored
            if depth < 0 {
                break;
            }
        }
    }

    match container {
        Container::Object => Value::Object(entries),
        Container::Array => Value::Array(items),
    }
}

fn parse_child(segment: &str, level: usize, options: &ParseOptions) -> Option<Value> {
    if options.keeps_level(level) {
        let child = parse_node(segment, level, options, false).unwrap_or_else(|err| {
            tracing::warn!(error = %err, level, "improper JSON formatting; using null");
            Value::Null
        });
        return Some(child);
    }

    if level >= MAX_DEPTH {
        tracing::warn!(level, "reached max depth while parsing");
    }
    options
        .store_excess_as_raw
        .then(|| Value::Baked(segment.to_string()))
}
