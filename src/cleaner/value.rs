//! Literal-value cleaner.
//!
//! This module provides [`ValueCleaner`], which accepts only values strictly
//! equal to one of a fixed list of literals.

use crate::data::Data;
use crate::error::{CleanError, CleanResult, ErrorKind};

use super::traits::Cleaner;

/// A cleaner that accepts one of a fixed set of literal values.
///
/// Literals are compared with [`Data::strict_eq`] in declaration order and the
/// first match wins. `Undefined` matches only `Undefined`, never `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCleaner {
    values: Vec<Data>,
}

impl ValueCleaner {
    /// Returns the accepted literals in declaration order.
    pub fn values(&self) -> &[Data] {
        &self.values
    }

    fn mismatch(&self, raw: &Data) -> CleanError {
        let expected = self
            .values
            .iter()
            .map(Data::show)
            .collect::<Vec<_>>()
            .join(" | ");
        let expected = if self.values.len() == 1 {
            expected
        } else {
            format!("one of: {}", expected)
        };
        CleanError::expected(ErrorKind::LiteralMismatch, &expected, raw)
    }
}

impl Cleaner for ValueCleaner {
    type Output = Data;

    fn clean(&self, raw: &Data) -> CleanResult<Data> {
        self.values
            .iter()
            .find(|value| raw.strict_eq(value))
            .map(|_| raw.clone())
            .ok_or_else(|| self.mismatch(raw))
    }
}

/// Creates a cleaner that accepts exactly one literal value.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_value, Cleaner, Data};
///
/// let as_123 = as_value(123);
/// assert_eq!(as_123.clean(&Data::from(123)).unwrap(), Data::from(123));
///
/// let error = as_123.clean(&Data::from("123")).unwrap_err();
/// assert_eq!(error.to_string(), r#"Expected 123, got "123""#);
/// ```
pub fn as_value(value: impl Into<Data>) -> ValueCleaner {
    as_values([value.into()])
}

/// Creates a cleaner that accepts any of the given literal values.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_values, Cleaner, Data};
///
/// let as_direction = as_values(["up", "down"]);
/// assert!(as_direction.clean(&Data::from("up")).is_ok());
///
/// let error = as_direction.clean(&Data::from("left")).unwrap_err();
/// assert_eq!(error.to_string(), r#"Expected one of: "up" | "down", got "left""#);
/// ```
pub fn as_values<I>(values: I) -> ValueCleaner
where
    I: IntoIterator,
    I::Item: Into<Data>,
{
    ValueCleaner {
        values: values.into_iter().map(Into::into).collect(),
    }
}
