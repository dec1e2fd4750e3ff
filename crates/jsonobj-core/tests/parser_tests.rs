use jsonobj_core::{parse, parse_with, try_parse, JsonObjError, Kind, ParseOptions, Value};

/// Nesting level of the deepest node; a scalar or empty root is level 0.
fn max_level(value: &Value) -> usize {
    value.iter().map(|child| 1 + max_level(child)).max().unwrap_or(0)
}

fn nested_arrays(levels: usize) -> String {
    format!("{}7{}", "[".repeat(levels), "]".repeat(levels))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn empty_and_whitespace_input_is_null() {
    assert_eq!(parse(""), Value::Null);
    assert_eq!(parse(" \r\n\t"), Value::Null);
    assert_eq!(parse("\u{FEFF}"), Value::Null);
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(parse("true"), Value::Bool(true));
    assert_eq!(parse("TRUE"), Value::Bool(true));
    assert_eq!(parse("False"), Value::Bool(false));
    assert_eq!(parse("NULL"), Value::Null);
}

#[test]
fn integer_literal_sets_integer_flag() {
    let v = parse("42");
    let n = v.as_number().unwrap();
    assert!(n.is_integer());
    assert_eq!(n.as_i64(), Some(42));
    assert_eq!(n.as_f64(), 42.0);
}

#[test]
fn decimal_literal_is_float_only() {
    let v = parse("3.0");
    let n = v.as_number().unwrap();
    assert!(!n.is_integer());
    assert_eq!(n.as_f64(), 3.0);
}

#[test]
fn negative_and_exponent_literals() {
    assert_eq!(parse("-17").as_i64(), Some(-17));
    assert_eq!(parse("-2.5").as_f64(), Some(-2.5));
    let exp = parse("1e3");
    assert_eq!(exp.as_f64(), Some(1000.0));
    assert!(!exp.as_number().unwrap().is_integer());
}

#[test]
fn integer_too_large_for_i64_stays_float() {
    let v = parse("123456789012345678901234567890");
    let n = v.as_number().unwrap();
    assert!(!n.is_integer());
    assert!(n.as_f64() > 1e29);
}

#[test]
fn non_finite_tokens_parse_to_special_floats() {
    assert_eq!(parse(r#""INFINITY""#).as_f64(), Some(f64::INFINITY));
    assert_eq!(parse(r#""NEGINFINITY""#).as_f64(), Some(f64::NEG_INFINITY));
    assert!(parse(r#""NaN""#).as_f64().unwrap().is_nan());
}

#[test]
fn bare_non_finite_token_degrades_to_null() {
    assert_eq!(parse("INFINITY"), Value::Null);
    assert_eq!(parse("NaN"), Value::Null);
    let err = try_parse("INFINITY", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, JsonObjError::InvalidNumber { ref literal } if literal == "INFINITY"));
}

#[test]
fn non_finite_tokens_are_exact_match() {
    assert_eq!(parse(r#""Infinity""#), Value::from("Infinity"));
    assert_eq!(parse(r#""nan""#), Value::from("nan"));
}

#[test]
fn string_strips_one_quote_each_side_without_unescaping() {
    assert_eq!(parse(r#""hello""#), Value::from("hello"));
    assert_eq!(parse(r#""a\"b""#), Value::from(r#"a\"b"#));
    assert_eq!(parse(r#""line\nbreak""#), Value::from(r"line\nbreak"));
    assert_eq!(parse(r#""""#), Value::from(""));
}

#[test]
fn malformed_literal_degrades_to_null() {
    assert_eq!(parse("nope"), Value::Null);
    assert_eq!(parse("12abc"), Value::Null);
    assert_eq!(parse("inf"), Value::Null);
}

#[test]
fn try_parse_reports_malformed_literal() {
    let err = try_parse("nope", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, JsonObjError::InvalidNumber { ref literal } if literal == "nope"));
}

#[test]
fn from_str_uses_default_options() {
    let v: Value = "[1,2]".parse().unwrap();
    assert_eq!(v.len(), 2);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn empty_containers_have_no_children() {
    let obj = parse("{}");
    assert_eq!(obj.kind(), Kind::Object);
    assert_eq!(obj.len(), 0);
    let arr = parse("[ ]");
    assert_eq!(arr.kind(), Kind::Array);
    assert_eq!(arr.len(), 0);
}

#[test]
fn object_keys_keep_source_order() {
    let v = parse(r#"{"z":1,"a":2,"m":3}"#);
    assert_eq!(v.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
}

#[test]
fn whitespace_between_tokens_is_ignored() {
    let v = parse("{ \"a\" : 1 ,\n\t\"b\" : [ 1 , 2 ] }");
    assert_eq!(v.to_string(), r#"{"a":1,"b":[1,2]}"#);
}

#[test]
fn empty_segments_are_skipped() {
    assert_eq!(parse("[1,,2, ,]").to_string(), "[1,2]");
}

#[test]
fn brackets_inside_strings_do_not_affect_depth() {
    let v = parse(r#"{"a":"[{,}]","b":2}"#);
    assert_eq!(v.get_field("a"), Some(&Value::from("[{,}]")));
    assert_eq!(v.get_or("b", 0i32), 2);
}

#[test]
fn escaped_quote_does_not_close_string() {
    let v = parse(r#"["a\",b", 3]"#);
    assert_eq!(v.len(), 2);
    assert_eq!(v.get(0), Some(&Value::from(r#"a\",b"#)));
}

#[test]
fn keys_with_colons_and_commas() {
    let v = parse(r#"{"a:b,c":1}"#);
    assert_eq!(v.keys().collect::<Vec<_>>(), ["a:b,c"]);
}

#[test]
fn duplicate_keys_are_kept() {
    let v = parse(r#"{"a":1,"a":2}"#);
    assert_eq!(v.len(), 2);
    assert_eq!(v.get_or("a", 0i32), 1);
}

#[test]
fn nested_structures() {
    let v = parse(r#"{"a":{"b":{"c":[1,[2,[3]]]}}}"#);
    let c = v
        .get_field("a")
        .and_then(|a| a.get_field("b"))
        .and_then(|b| b.get_field("c"))
        .unwrap();
    assert_eq!(c.to_string(), "[1,[2,[3]]]");
}

#[test]
fn malformed_child_degrades_locally() {
    let v = parse(r#"{"a":oops,"b":2}"#);
    assert_eq!(v.get_field("a"), Some(&Value::Null));
    assert_eq!(v.get_or("b", 0i32), 2);
}

#[test]
fn trailing_bytes_after_closing_bracket_are_ignored() {
    assert_eq!(parse("{\"a\":1}\u{00A0}").to_string(), r#"{"a":1}"#);
    assert_eq!(parse("{}\u{FEFF}0"), Value::object());
    assert_eq!(parse("[1]]]x").to_string(), "[1]");
}

#[test]
fn non_ascii_after_nested_bracket_does_not_split_chars() {
    assert_eq!(parse("[[1]é,2]").to_string(), "[[1],2]");
    assert_eq!(parse(r#"{"k":{"x":1}☕,"n":2}"#).to_string(), r#"{"k":{"x":1},"n":2}"#);
}

#[test]
fn unicode_content_survives() {
    let v = parse(r#"{"név":"café ☕","日本":[1]}"#);
    assert_eq!(v.get_field("név"), Some(&Value::from("café ☕")));
    assert_eq!(v.get_field("日本").map(Value::len), Some(1));
}

// ============================================================================
// Strict mode
// ============================================================================

#[test]
fn strict_rejects_scalar_root() {
    let strict = ParseOptions::new().strict(true);
    assert_eq!(parse_with("42", &strict), Value::Null);
    assert_eq!(parse_with(r#""s""#, &strict), Value::Null);
    let err = try_parse("true", &strict).unwrap_err();
    assert!(matches!(err, JsonObjError::StrictRoot { found: 't' }));
}

#[test]
fn strict_accepts_containers_and_relaxes_for_children() {
    let strict = ParseOptions::new().strict(true);
    let v = parse_with(r#"[1,"two",true]"#, &strict);
    assert_eq!(v.to_string(), r#"[1,"two",true]"#);
}

// ============================================================================
// Depth budget
// ============================================================================

#[test]
fn max_depth_drops_deeper_values() {
    let options = ParseOptions::new().max_depth(2);
    let v = parse_with(r#"{"a":{"b":{"c":1}},"d":1}"#, &options);
    assert_eq!(v.to_string(), r#"{"a":{},"d":1}"#);
    assert!(max_level(&v) < 2);
}

#[test]
fn max_depth_stores_excess_as_baked_text() {
    let options = ParseOptions::new().max_depth(2).store_excess_as_raw(true);
    let source = r#"{"a":{"b":{"c":1}},"d":1}"#;
    let v = parse_with(source, &options);
    let b = v.get_field("a").and_then(|a| a.get_field("b")).unwrap();
    assert_eq!(b, &Value::baked(r#"{"c":1}"#));
    assert_eq!(v.to_string(), source);
}

#[test]
fn max_depth_zero_keeps_only_root() {
    let v = parse_with("[1,[2]]", &ParseOptions::new().max_depth(0));
    assert_eq!(v, Value::array());
    let v = parse_with("5", &ParseOptions::new().max_depth(0));
    assert_eq!(v.as_i64(), Some(5));
}

#[test]
fn unbounded_parse_stops_at_hard_cap() {
    let v = parse(&nested_arrays(150));
    assert_eq!(max_level(&v), jsonobj_core::MAX_DEPTH - 1);
}

#[test]
fn hard_cap_with_raw_storage_keeps_text() {
    let options = ParseOptions::new().store_excess_as_raw(true);
    let source = nested_arrays(150);
    let v = parse_with(&source, &options);
    assert_eq!(v.to_string(), source);
}
