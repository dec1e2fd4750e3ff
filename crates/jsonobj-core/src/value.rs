//! The document value type: one node kind for every JSON value.
//!
//! `Value` is an explicit sum type. Objects are stored as an insertion-ordered
//! list of `(key, value)` pairs, so key order survives parse → mutate → print
//! and duplicate keys are representable (only [`Value::set_field`] replaces).
//!
//! Numbers keep two representations: the `f64` payload and, when the literal
//! had no decimal point (or the value came from an integer type), an exact
//! `i64` payload. `3` and `3.0` therefore print back differently even though
//! they compare equal as floats.
//!
//! # Example
//! ```
//! use jsonobj_core::Value;
//!
//! let mut event = Value::object();
//! event.add_field("name", "jump");
//! event.add_field("count", 3);
//! event.add_field("pos", Value::vector3(1.5, 0.0, -2.0));
//! assert_eq!(
//!     event.to_string(),
//!     r#"{"name":"jump","count":3,"pos":{"x":1.5,"y":0.0,"z":-2.0}}"#
//! );
//! assert_eq!(event.get_or("count", 0i64), 3);
//! assert_eq!(event.get_or("missing", 7i64), 7);
//! ```

use crate::{parser, printer};

pub(crate) const INFINITY_TOKEN: &str = "INFINITY";
pub(crate) const NEG_INFINITY_TOKEN: &str = "NEGINFINITY";
pub(crate) const NAN_TOKEN: &str = "NaN";

/// The seven node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Baked,
}

/// A numeric payload with an optional exact integer representation.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    float: f64,
    int: Option<i64>,
}

impl Number {
    /// A float-flagged number. Prints with a decimal point or a non-finite token.
    pub fn from_f64(float: f64) -> Self {
        Self { float, int: None }
    }

    /// An integer-flagged number; both payloads are populated.
    pub fn from_i64(int: i64) -> Self {
        Self {
            float: int as f64,
            int: Some(int),
        }
    }

    pub(crate) fn from_parts(float: f64, int: Option<i64>) -> Self {
        Self { float, int }
    }

    /// Map the wire tokens for non-finite floats back to their values.
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        let float = match token {
            INFINITY_TOKEN => f64::INFINITY,
            NEG_INFINITY_TOKEN => f64::NEG_INFINITY,
            NAN_TOKEN => f64::NAN,
            _ => return None,
        };
        Some(Self::from_f64(float))
    }

    /// The token used on the wire for a non-finite float payload, if any.
    pub(crate) fn non_finite_token(&self) -> Option<&'static str> {
        if self.int.is_some() {
            return None;
        }
        if self.float.is_nan() {
            Some(NAN_TOKEN)
        } else if self.float == f64::INFINITY {
            Some(INFINITY_TOKEN)
        } else if self.float == f64::NEG_INFINITY {
            Some(NEG_INFINITY_TOKEN)
        } else {
            None
        }
    }

    /// Whether the integer payload is present.
    pub fn is_integer(&self) -> bool {
        self.int.is_some()
    }

    pub fn as_f64(&self) -> f64 {
        self.float
    }

    /// The exact integer payload, only for integer-flagged numbers.
    pub fn as_i64(&self) -> Option<i64> {
        self.int
    }

    /// The integer payload when present, otherwise the float truncated
    /// toward zero (saturating at the `i64` bounds, NaN → 0).
    pub fn to_i64_lossy(&self) -> i64 {
        self.int.unwrap_or(self.float as i64)
    }
}

/// Structural equality: integer flags must match and NaN equals NaN.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.int == other.int
            && (self.float == other.float || (self.float.is_nan() && other.float.is_nan()))
    }
}

/// A JSON document node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Keys need not be unique.
    Object(Vec<(String, Value)>),
    /// Pre-serialized text, printed verbatim.
    Baked(String),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// A string node. The text is stored verbatim; nothing is escaped.
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// A baked node holding already-serialized text.
    pub fn baked(raw: impl Into<String>) -> Self {
        Value::Baked(raw.into())
    }

    /// An object with float fields `x`, `y`, `z`, in that order.
    pub fn vector3(x: f32, y: f32, z: f32) -> Self {
        let mut vector = Value::object();
        vector.add_field("x", x);
        vector.add_field("y", y);
        vector.add_field("z", z);
        vector
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Baked(_) => Kind::Baked,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_baked(&self) -> bool {
        matches!(self, Value::Baked(_))
    }

    /// Arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Number of children; 0 for anything that is not a container.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// The exact integer payload of an integer-flagged number.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Text of a String or Baked node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Baked(s) => Some(s),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append `value`, turning this node into an array first if needed.
    ///
    /// An object keeps its children (its keys are dropped); any other kind
    /// starts from an empty array.
    pub fn add(&mut self, value: impl Into<Value>) {
        if !self.is_array() {
            let items = match std::mem::take(self) {
                Value::Object(entries) => entries.into_iter().map(|(_, v)| v).collect(),
                _ => Vec::new(),
            };
            *self = Value::Array(items);
        }
        if let Value::Array(items) = self {
            items.push(value.into());
        }
    }

    /// Append a field, turning this node into an object first if needed.
    ///
    /// An array is promoted by keying its existing children `"0"`, `"1"`, …
    /// No uniqueness check is made on `name`.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if !self.is_object() {
            let entries = match std::mem::take(self) {
                Value::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
                _ => Vec::new(),
            };
            *self = Value::Object(entries);
        }
        if let Value::Object(entries) = self {
            entries.push((name.into(), value.into()));
        }
    }

    /// Replace the first field named `name`. The replacement is appended, so
    /// a replaced field moves to the end of the key order.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.remove_field(&name);
        self.add_field(name, value);
    }

    /// Remove and return the first field named `name`.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        let Value::Object(entries) = self else {
            return None;
        };
        let index = entries.iter().position(|(key, _)| key == name)?;
        Some(entries.remove(index).1)
    }

    /// Replace the child at `index`, returning the previous one. Out-of-range
    /// indices leave the node untouched and return `None`.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let slot = self.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Reset to `Null`, dropping all payloads.
    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    /// Replace this node with `other`, taking its kind and payload.
    pub fn absorb(&mut self, other: Value) {
        *self = other;
    }

    /// Serialize the subtree once and keep only the text. Irreversible.
    pub fn bake(&mut self) {
        if !self.is_baked() {
            let text = printer::print(self, false);
            self.bake_with(text);
        }
    }

    /// Deep copy through a print/parse round trip. Unlike `clone`, this turns
    /// baked nodes back into parsed structure.
    pub fn copy(&self) -> Value {
        parser::parse(&printer::print(self, false))
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            Value::Object(entries) => entries.get(index).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Array(items) => items.get_mut(index),
            Value::Object(entries) => entries.get_mut(index).map(|(_, v)| v),
            _ => None,
        }
    }

    /// First field named `name`. Only objects have fields.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.entries()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, v)| v)
    }

    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self {
            Value::Object(entries) => entries
                .iter_mut()
                .find(|(key, _)| key == name)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// True when every name is present. Always false for non-objects.
    pub fn has_fields(&self, names: &[&str]) -> bool {
        self.is_object() && names.iter().all(|name| self.has_field(name))
    }

    /// Read a field through [`FromField`]. `None` only when the field is absent.
    pub fn get_as<T: FromField>(&self, name: &str) -> Option<T> {
        self.get_field(name).map(T::from_field)
    }

    /// Read a field, or return `fallback` when it is absent.
    pub fn get_or<T: FromField>(&self, name: &str, fallback: T) -> T {
        self.get_as(name).unwrap_or(fallback)
    }

    /// Read a field, or call `not_found` with the missing name.
    pub fn get_or_else<T: FromField>(&self, name: &str, not_found: impl FnOnce(&str) -> T) -> T {
        match self.get_as(name) {
            Some(value) => value,
            None => not_found(name),
        }
    }

    /// Field names of an object in order; empty for anything else.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().iter().map(|(key, _)| key.as_str())
    }

    /// Object pairs in order; empty for anything else.
    pub fn entries(&self) -> &[(String, Value)] {
        match self {
            Value::Object(entries) => entries,
            _ => &[],
        }
    }

    /// Children of an array or object in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        let items: &[Value] = match self {
            Value::Array(items) => items,
            _ => &[],
        };
        items.iter().chain(self.entries().iter().map(|(_, v)| v))
    }

    /// Flatten an object of primitives into `(key, text)` pairs.
    ///
    /// Strings are taken verbatim and bools print as `true`/`false`. Numbers use
    /// the plain invariant form: whole floats drop the `.0` the printer adds,
    /// non-finite values read `Infinity`, `-Infinity` and `NaN`.
    /// Other values are skipped with a warning. Non-objects yield `None`.
    pub fn to_string_map(&self) -> Option<Vec<(String, String)>> {
        let Value::Object(entries) = self else {
            tracing::warn!(kind = ?self.kind(), "cannot flatten a non-object into a string map");
            return None;
        };
        let mut map = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                Value::String(s) => map.push((key.clone(), s.clone())),
                Value::Number(n) => map.push((key.clone(), invariant_number(n))),
                Value::Bool(b) => map.push((key.clone(), b.to_string())),
                other => {
                    tracing::warn!(key = %key, kind = ?other.kind(), "omitting field from string map");
                }
            }
        }
        Some(map)
    }
}

fn invariant_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    let float = number.as_f64();
    if float.is_nan() {
        "NaN".to_string()
    } else if float.is_infinite() {
        if float > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        float.to_string()
    }
}

/// Conversion used by the typed field getters.
///
/// A present field of the wrong kind is not an error: it reads as the zero
/// value of the requested type (`false`, `0`, `""`). Numeric reads use the
/// integer payload when present and otherwise cast the float payload.
pub trait FromField: Sized {
    fn from_field(value: &Value) -> Self;
}

impl FromField for bool {
    fn from_field(value: &Value) -> Self {
        value.as_bool().unwrap_or(false)
    }
}

impl FromField for f64 {
    fn from_field(value: &Value) -> Self {
        value.as_number().map_or(0.0, |n| match n.as_i64() {
            Some(int) => int as f64,
            None => n.as_f64(),
        })
    }
}

impl FromField for f32 {
    fn from_field(value: &Value) -> Self {
        f64::from_field(value) as f32
    }
}

impl FromField for i64 {
    fn from_field(value: &Value) -> Self {
        value.as_number().map_or(0, Number::to_i64_lossy)
    }
}

impl FromField for i32 {
    fn from_field(value: &Value) -> Self {
        i64::from_field(value).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl FromField for u32 {
    fn from_field(value: &Value) -> Self {
        i64::from_field(value).clamp(0, u32::MAX as i64) as u32
    }
}

impl FromField for String {
    fn from_field(value: &Value) -> Self {
        value.as_str().unwrap_or_default().to_string()
    }
}

impl FromField for Value {
    fn from_field(value: &Value) -> Self {
        value.clone()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::from_f64(f))
    }
}

/// Widens through the shortest decimal form, so `0.1f32` stays `0.1`.
impl From<f32> for Value {
    fn from(f: f32) -> Self {
        let widened = f.to_string().parse::<f64>().unwrap_or(f as f64);
        Value::Number(Number::from_f64(widened))
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Number(Number::from_i64(i as i64))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Build an object from `(name, value)` pairs, keeping their order.
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
