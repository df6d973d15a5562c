//! Primitive cleaners.
//!
//! This module provides the atomic checks for booleans, numbers, strings, and
//! the accept-anything cleaner, plus the null/undefined/none conveniences built
//! from literal and optional cleaners. Primitive checks never coerce.

use crate::data::Data;
use crate::error::{CleanError, CleanResult, ErrorKind};

use super::combinators::{as_optional, OptionalCleaner};
use super::traits::Cleaner;
use super::value::{as_value, ValueCleaner};

/// Accepts only booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCleaner;

impl Cleaner for BooleanCleaner {
    type Output = bool;

    fn clean(&self, raw: &Data) -> CleanResult<bool> {
        raw.as_bool()
            .ok_or_else(|| CleanError::expected(ErrorKind::TypeMismatch, "a boolean", raw))
    }
}

/// Accepts only numbers, including `NaN` and the infinities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCleaner;

impl Cleaner for NumberCleaner {
    type Output = f64;

    fn clean(&self, raw: &Data) -> CleanResult<f64> {
        raw.as_f64()
            .ok_or_else(|| CleanError::expected(ErrorKind::TypeMismatch, "a number", raw))
    }
}

/// Accepts only strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCleaner;

impl Cleaner for StringCleaner {
    type Output = String;

    fn clean(&self, raw: &Data) -> CleanResult<String> {
        raw.as_str()
            .map(str::to_string)
            .ok_or_else(|| CleanError::expected(ErrorKind::TypeMismatch, "a string", raw))
    }
}

/// Accepts anything, returning it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCleaner;

impl Cleaner for UnknownCleaner {
    type Output = Data;

    fn clean(&self, raw: &Data) -> CleanResult<Data> {
        Ok(raw.clone())
    }
}

/// Creates a cleaner that accepts only booleans.
pub fn as_boolean() -> BooleanCleaner {
    BooleanCleaner
}

/// Creates a cleaner that accepts only numbers.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_number, Cleaner, Data};
///
/// assert_eq!(as_number().clean(&Data::from(-1)).unwrap(), -1.0);
///
/// let error = as_number().clean(&Data::from("0")).unwrap_err();
/// assert_eq!(error.to_string(), r#"Expected a number, got "0""#);
/// ```
pub fn as_number() -> NumberCleaner {
    NumberCleaner
}

/// Creates a cleaner that accepts only strings.
pub fn as_string() -> StringCleaner {
    StringCleaner
}

/// Creates a cleaner that accepts any value.
pub fn as_unknown() -> UnknownCleaner {
    UnknownCleaner
}

/// Creates a cleaner that accepts only `null`.
pub fn as_null() -> ValueCleaner {
    as_value(Data::Null)
}

/// Creates a cleaner that accepts only `undefined`, the absent value.
pub fn as_undefined() -> ValueCleaner {
    as_value(Data::Undefined)
}

/// Creates a cleaner that accepts `null` or `undefined`, producing `None` for both.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_none, Cleaner, Data};
///
/// assert_eq!(as_none().clean(&Data::Null).unwrap(), None);
/// assert_eq!(as_none().clean(&Data::Undefined).unwrap(), None);
/// assert!(as_none().clean(&Data::from(false)).is_err());
/// ```
pub fn as_none() -> OptionalCleaner<ValueCleaner> {
    as_optional(as_null())
}
