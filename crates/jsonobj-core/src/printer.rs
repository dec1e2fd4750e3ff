//! Eager serializer: walks the whole tree in one call.
//!
//! Output rules shared with [`crate::cooperative`]:
//!
//! - Strings and keys are wrapped in `"` with **no escaping**.
//! - Integer-flagged numbers print their `i64` payload; float-flagged numbers
//!   print the shortest round-trip form, always with a decimal point, and
//!   non-finite values as the quoted tokens `"INFINITY"`, `"NEGINFINITY"`,
//!   `"NaN"`.
//! - Baked nodes are emitted verbatim.
//! - Pretty output puts each child on its own line, indented with one tab per
//!   nesting level, with no space after `:`.
//! - Children nested deeper than [`MAX_DEPTH`] are skipped with a warning.

use std::fmt;

use crate::parser::MAX_DEPTH;
use crate::value::{Number, Value};

/// Serialize `value` in one pass.
///
/// ```
/// use jsonobj_core::{parse, print};
///
/// let doc = parse(r#"{"a":[1,2.5]}"#);
/// assert_eq!(print(&doc, false), r#"{"a":[1,2.5]}"#);
/// assert_eq!(print(&doc, true), "{\n\t\"a\":[\n\t\t1,\n\t\t2.5\n\t]\n}");
/// ```
pub fn print(value: &Value, pretty: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, pretty, &mut out);
    out
}

fn write_value(value: &Value, level: usize, pretty: bool, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            let mut wrote = false;
            for item in items {
                write_child(None, item, level + 1, pretty, &mut wrote, out);
            }
            close_container(']', level, pretty, wrote, out);
        }
        Value::Object(entries) => {
            out.push('{');
            let mut wrote = false;
            for (key, item) in entries {
                write_child(Some(key), item, level + 1, pretty, &mut wrote, out);
            }
            close_container('}', level, pretty, wrote, out);
        }
        _ => write_scalar(value, out),
    }
}

fn write_child(
    key: Option<&str>,
    child: &Value,
    level: usize,
    pretty: bool,
    wrote: &mut bool,
    out: &mut String,
) {
    if level > MAX_DEPTH {
        tracing::warn!(level, "reached max depth while printing; skipping branch");
        return;
    }
    open_child(key, level, pretty, *wrote, out);
    *wrote = true;
    write_value(child, level, pretty, out);
}

/// Separator, indentation, and key that precede a child at `level`.
pub(crate) fn open_child(key: Option<&str>, level: usize, pretty: bool, after_sibling: bool, out: &mut String) {
    if after_sibling {
        out.push(',');
    }
    if pretty {
        out.push('\n');
        push_indent(level, out);
    }
    if let Some(key) = key {
        out.push('"');
        out.push_str(key);
        out.push_str("\":");
    }
}

pub(crate) fn close_container(bracket: char, level: usize, pretty: bool, wrote: bool, out: &mut String) {
    if pretty && wrote {
        out.push('\n');
        push_indent(level, out);
    }
    out.push(bracket);
}

/// Everything except arrays and objects, which the callers walk themselves.
pub(crate) fn write_scalar(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Baked(raw) => out.push_str(raw),
        Value::Array(_) | Value::Object(_) => {}
    }
}

fn write_number(number: &Number, out: &mut String) {
    if let Some(int) = number.as_i64() {
        out.push_str(&int.to_string());
        return;
    }
    if let Some(token) = number.non_finite_token() {
        out.push('"');
        out.push_str(token);
        out.push('"');
        return;
    }
    // `Display` for f64 never uses exponents, so a missing '.' means a whole number.
    let text = number.as_f64().to_string();
    out.push_str(&text);
    if !text.contains('.') {
        out.push_str(".0");
    }
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push('\t');
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_number(self, &mut out);
        f.write_str(&out)
    }
}

/// Compact by default; `{:#}` prints the pretty form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self, f.alternate()))
    }
}
