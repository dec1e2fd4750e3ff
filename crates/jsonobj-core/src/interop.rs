//! Conversions between [`Value`] and the serde ecosystem.
//!
//! - `serde_json::Value` → `Value` is infallible. `i64`-representable numbers
//!   become integer-flagged, everything else float-flagged.
//! - `&Value` → `serde_json::Value` can fail on baked text that is not strict
//!   JSON. Non-finite floats become the token strings used on the wire, and
//!   duplicate keys collapse (the last value wins, at the first key's position).
//! - `Serialize`/`Deserialize` follow the same mapping, so a `Value` can be
//!   embedded in any serde-driven format.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Map;

use crate::error::{JsonObjError, Result};
use crate::parser;
use crate::value::{Number, Value};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(int) => Value::from(int),
                None => Value::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = JsonObjError;

    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    map.insert(key.clone(), serde_json::Value::try_from(item)?);
                }
                serde_json::Value::Object(map)
            }
            Value::Baked(raw) => serde_json::from_str(raw)?,
        })
    }
}

fn number_to_json(n: &Number) -> serde_json::Value {
    if let Some(int) = n.as_i64() {
        return serde_json::Value::from(int);
    }
    match serde_json::Number::from_f64(n.as_f64()) {
        Some(number) => serde_json::Value::Number(number),
        None => serde_json::Value::String(n.non_finite_token().unwrap_or_default().to_string()),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match (n.as_i64(), n.non_finite_token()) {
                (Some(int), _) => serializer.serialize_i64(int),
                (None, Some(token)) => serializer.serialize_str(token),
                (None, None) => serializer.serialize_f64(n.as_f64()),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
            Value::Baked(raw) => parser::parse(raw).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
