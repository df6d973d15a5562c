use cleaners::{
    as_array, as_boolean, as_date, as_either, as_maybe, as_number, as_object, as_optional,
    as_string, as_value, Cleaner, Data, Shape,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ====== as_either Tests ======

#[test]
fn test_either_returns_first_match() {
    let as_size = as_either(as_number()).or(as_string());
    assert_eq!(as_size.clean(&Data::from(12)).unwrap(), Data::from(12));
    assert_eq!(as_size.clean(&Data::from("1em")).unwrap(), Data::from("1em"));
}

#[test]
fn test_either_raises_last_error() {
    let as_size = as_either(as_number()).or(as_string());
    let error = as_size.clean(&Data::Null).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got null");
}

#[test]
fn test_either_last_error_keeps_its_path() {
    let as_payload = as_either(as_number()).or(as_array(as_string()));
    let error = as_payload.clean(&Data::from(json!(["a", 1]))).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got 1 at [1]");
}

#[test]
fn test_either_of_literals() {
    let as_mode = as_either(as_value("auto")).or(as_number());
    assert_eq!(as_mode.clean(&Data::from("auto")).unwrap(), Data::from("auto"));
    assert!(as_mode.clean(&Data::from("manual")).is_err());
}

// ====== as_optional Tests ======

#[test]
fn test_optional_accepts_missing_values() {
    let as_maybe_string = as_optional(as_string());
    assert_eq!(as_maybe_string.clean(&Data::Null).unwrap(), None);
    assert_eq!(as_maybe_string.clean(&Data::Undefined).unwrap(), None);
    assert_eq!(
        as_maybe_string.clean(&Data::from("x")).unwrap(),
        Some("x".to_string())
    );
}

#[test]
fn test_optional_rejects_wrong_values() {
    let error = as_optional(as_string()).clean(&Data::from(false)).unwrap_err();
    assert_eq!(error.to_string(), "Expected a string, got false");
}

#[test]
fn test_optional_fallback() {
    let as_limit = as_optional(as_number()).fallback(10.0);
    assert_eq!(as_limit.clean(&Data::Null).unwrap(), Some(10.0));
    assert_eq!(as_limit.clean(&Data::from(3)).unwrap(), Some(3.0));
}

#[test]
fn test_optional_fallback_is_fresh() {
    let as_numbers = as_optional(as_array(as_number())).fallback_with(Vec::new);

    let mut first = as_numbers.clean(&Data::Undefined).unwrap().unwrap();
    first.push(1.0);
    let second = as_numbers.clean(&Data::Undefined).unwrap().unwrap();

    assert_eq!(first, vec![1.0]);
    assert!(second.is_empty());
}

// ====== as_maybe Tests ======

#[test]
fn test_maybe_type_guards() {
    let as_maybe_number = as_maybe(as_number());
    assert_eq!(as_maybe_number.clean(&Data::from(123)).unwrap(), Some(123.0));
    assert_eq!(as_maybe_number.clean(&Data::from("123")).unwrap(), None);

    let as_maybe_string = as_maybe(as_string());
    assert_eq!(
        as_maybe_string.clean(&Data::from("123")).unwrap(),
        Some("123".to_string())
    );
    assert_eq!(as_maybe_string.clean(&Data::from(123)).unwrap(), None);
}

#[test]
fn test_maybe_dates() {
    let as_maybe_date = as_maybe(as_date());
    assert!(as_maybe_date.clean(&Data::from("10-10-2020")).unwrap().is_some());
    assert!(as_maybe_date.clean(&Data::from("invalid date")).unwrap().is_none());
}

#[test]
fn test_maybe_objects() {
    let as_maybe_object = as_maybe(as_object(Shape::new().field("onlyProperty", as_boolean())));

    assert_eq!(
        as_maybe_object
            .clean_to_data(&Data::from(json!({"onlyProperty": true, "withOtherProperty": true})))
            .unwrap(),
        Data::from(json!({"onlyProperty": true}))
    );
    assert_eq!(
        as_maybe_object
            .clean_to_data(&Data::from(json!({"onlyProperty": "is not valid"})))
            .unwrap(),
        Data::Undefined
    );
    assert_eq!(
        as_maybe_object
            .clean_to_data(&Data::from(json!({"missingOnlyProperty": true})))
            .unwrap(),
        Data::Undefined
    );
}

#[test]
fn test_maybe_fallbacks() {
    let as_safe_number = as_maybe(as_number()).fallback(0.0);
    assert_eq!(as_safe_number.clean(&Data::from("bad")).unwrap(), Some(0.0));

    let as_safe_numbers = as_maybe(as_array(as_number())).fallback_with(Vec::new);
    assert_eq!(
        as_safe_numbers.clean(&Data::from("bad")).unwrap(),
        Some(Vec::<f64>::new())
    );
    assert_eq!(
        as_safe_numbers.clean(&Data::from(json!([1, 2]))).unwrap(),
        Some(vec![1.0, 2.0])
    );
}

#[test]
fn test_maybe_inside_object_never_fails() {
    let as_settings = as_object(
        Shape::new()
            .field("name", as_string())
            .field("volume", as_maybe(as_number()).fallback(5.0)),
    );
    let clean = as_settings
        .clean_to_data(&Data::from(json!({"name": "x", "volume": "loud"})))
        .unwrap();
    assert_eq!(clean, Data::from(json!({"name": "x", "volume": 5})));
}
