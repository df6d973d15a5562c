use cleaners::{
    as_boolean, as_none, as_null, as_number, as_string, as_undefined, as_unknown, as_value,
    as_values, Cleaner, Data, ErrorKind,
};
use serde_json::json;

// ====== Primitive Tests ======

#[test]
fn test_boolean() {
    assert!(as_boolean().clean(&Data::from(true)).unwrap());

    let error = as_boolean().clean(&Data::from(1)).unwrap_err();
    assert_eq!(error.to_string(), "Expected a boolean, got 1");
}

#[test]
fn test_number() {
    assert_eq!(as_number().clean(&Data::from(-2.5)).unwrap(), -2.5);

    let error = as_number().clean(&Data::from(json!([1]))).unwrap_err();
    assert_eq!(error.to_string(), "Expected a number, got array");
    assert_eq!(error.kind(), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_number_shows_special_values_in_messages() {
    let error = as_string().clean(&Data::Number(f64::NAN)).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got NaN");

    let error = as_string().clean(&Data::Number(f64::NEG_INFINITY)).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got -Infinity");
}

#[test]
fn test_string() {
    assert_eq!(as_string().clean(&Data::from("hi")).unwrap(), "hi");

    let error = as_string().clean(&Data::from(json!({"a": 1}))).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got object");
}

#[test]
fn test_string_message_escapes_quotes() {
    let error = as_number().clean(&Data::from("\"")).unwrap_err();
    assert_eq!(error.to_string(), r#"Expected a number, got "\"""#);
}

#[test]
fn test_unknown_accepts_everything() {
    for value in [json!(null), json!(1), json!("x"), json!([]), json!({})] {
        let data = Data::from(value);
        assert_eq!(as_unknown().clean(&data).unwrap(), data);
    }
}

// ====== Null / Undefined / None Tests ======

#[test]
fn test_null() {
    assert_eq!(as_null().clean(&Data::Null).unwrap(), Data::Null);
    assert!(as_null().clean(&Data::from(0)).is_err());
}

#[test]
fn test_undefined() {
    assert_eq!(as_undefined().clean(&Data::Undefined).unwrap(), Data::Undefined);
    assert!(as_undefined().clean(&Data::from("")).is_err());
}

#[test]
fn test_none_normalizes_to_undefined() {
    assert_eq!(as_none().clean_to_data(&Data::Null).unwrap(), Data::Undefined);
    assert_eq!(as_none().clean_to_data(&Data::Undefined).unwrap(), Data::Undefined);

    let error = as_none().clean(&Data::from(0)).unwrap_err();
    assert_eq!(error.to_string(), "Expected null, got 0");
}

// ====== Literal Tests ======

#[test]
fn test_value_single_literal() {
    let as_answer = as_value(42);
    assert_eq!(as_answer.clean(&Data::from(42)).unwrap(), Data::from(42));

    let error = as_answer.clean(&Data::from(41)).unwrap_err();
    assert_eq!(error.to_string(), "Expected 42, got 41");
    assert_eq!(error.kind(), Some(ErrorKind::LiteralMismatch));
}

#[test]
fn test_value_set_lists_every_literal() {
    let as_mixed = as_values([Data::from("a"), Data::from(1), Data::Null, Data::Undefined]);

    assert_eq!(as_mixed.clean(&Data::Null).unwrap(), Data::Null);
    assert_eq!(as_mixed.clean(&Data::Undefined).unwrap(), Data::Undefined);

    let error = as_mixed.clean(&Data::from(false)).unwrap_err();
    assert_eq!(
        error.to_string(),
        r#"Expected one of: "a" | 1 | null | undefined, got false"#
    );
}

#[test]
fn test_value_does_not_coerce() {
    let as_one = as_value(1);
    assert!(as_one.clean(&Data::from("1")).is_err());
    assert!(as_one.clean(&Data::from(true)).is_err());
    assert!(as_one.clean(&Data::from(1.0)).is_ok());
}
