//! Structural merge of an override document into a base document.
//!
//! Rules, applied recursively from the roots:
//!
//! - A `Null` base becomes a copy of the override.
//! - Object into object: for each override pair in order, a container value
//!   whose key exists in the base is merged into the base's value; a scalar
//!   value whose key exists replaces it via [`Value::set_field`]; an unknown
//!   key is appended.
//! - Array into array: the override may not be longer than the base. Each
//!   position present in both is updated only when the kinds match:
//!   containers merge, scalars are replaced.
//! - Every other combination leaves the base unchanged.

use crate::error::{JsonObjError, Result};
use crate::value::Value;

impl Value {
    /// Merge `right` into `self`.
    ///
    /// Fails with [`JsonObjError::MergeLengthMismatch`] when an array in
    /// `right` is longer than its counterpart in `self`; `self` is then left
    /// exactly as it was.
    ///
    /// ```
    /// use jsonobj_core::parse;
    ///
    /// let mut base = parse(r#"{"volume":5,"keys":{"jump":"space"}}"#);
    /// let overrides = parse(r#"{"volume":8,"keys":{"crouch":"c"}}"#);
    /// base.merge(&overrides).unwrap();
    /// assert_eq!(
    ///     base.to_string(),
    ///     r#"{"keys":{"jump":"space","crouch":"c"},"volume":8}"#
    /// );
    /// ```
    pub fn merge(&mut self, right: &Value) -> Result<()> {
        // a mismatch can involve fields this merge appends, so work on a copy
        let mut merged = self.clone();
        merge_into(&mut merged, right).inspect_err(|err| {
            tracing::debug!(error = %err, "merge rejected");
        })?;
        *self = merged;
        Ok(())
    }
}

fn merge_into(left: &mut Value, right: &Value) -> Result<()> {
    if left.is_null() {
        left.absorb(right.clone());
        return Ok(());
    }

    if let (true, Value::Object(right_entries)) = (left.is_object(), right) {
        for (key, value) in right_entries {
            if !left.has_field(key) {
                left.add_field(key.clone(), value.clone());
            } else if value.is_container() {
                if let Some(existing) = left.get_field_mut(key) {
                    merge_into(existing, value)?;
                }
            } else {
                left.set_field(key.clone(), value.clone());
            }
        }
        return Ok(());
    }

    if let (Value::Array(left_items), Value::Array(right_items)) = (left, right) {
        if right_items.len() > left_items.len() {
            return Err(JsonObjError::MergeLengthMismatch {
                left: left_items.len(),
                right: right_items.len(),
            });
        }
        for (slot, value) in left_items.iter_mut().zip(right_items) {
            if slot.kind() != value.kind() {
                continue;
            }
            if slot.is_container() {
                merge_into(slot, value)?;
            } else {
                *slot = value.clone();
            }
        }
    }
    Ok(())
}
