//! Tuple cleaner.
//!
//! This module provides [`TupleCleaner`] for fixed-length arrays whose
//! positions each have their own cleaner. The positions are declared as a Rust
//! tuple of cleaners, and the clean value is the tuple of their outputs.

use crate::data::{Data, UNDEFINED};
use crate::error::CleanResult;
use crate::path::PathSegment;

use super::array::expect_array;
use super::traits::Cleaner;

/// A fixed sequence of positional cleaners.
///
/// Implemented for tuples of one to eight cleaners.
pub trait TupleShape: Send + Sync {
    /// The tuple of clean values.
    type Output: Into<Data>;

    /// Returns the number of declared positions.
    fn arity(&self) -> usize;

    /// Cleans each declared position of `items` into the typed tuple.
    fn clean_items(&self, items: &[Data]) -> CleanResult<Self::Output>;

    /// Cleans each declared position of `items` into [`Data`].
    fn clean_items_to_data(&self, items: &[Data]) -> CleanResult<Vec<Data>>;
}

/// Cleans the item at `index`, reading past the end as `undefined`.
fn clean_at<T>(
    items: &[Data],
    index: usize,
    clean: impl FnOnce(&Data) -> CleanResult<T>,
) -> CleanResult<T> {
    let raw = items.get(index).unwrap_or(UNDEFINED);
    clean(raw).map_err(|e| e.locate(&PathSegment::index(index)))
}

macro_rules! tuple_shape {
    ($arity:expr; $($name:ident $index:tt),+) => {
        impl<$($name: Cleaner),+> TupleShape for ($($name,)+) {
            type Output = ($($name::Output,)+);

            fn arity(&self) -> usize {
                $arity
            }

            fn clean_items(&self, items: &[Data]) -> CleanResult<Self::Output> {
                Ok(($(clean_at(items, $index, |raw| self.$index.clean(raw))?,)+))
            }

            fn clean_items_to_data(&self, items: &[Data]) -> CleanResult<Vec<Data>> {
                Ok(vec![$(clean_at(items, $index, |raw| self.$index.clean_to_data(raw))?),+])
            }
        }
    };
}

tuple_shape!(1; A 0);
tuple_shape!(2; A 0, B 1);
tuple_shape!(3; A 0, B 1, C 2);
tuple_shape!(4; A 0, B 1, C 2, D 3);
tuple_shape!(5; A 0, B 1, C 2, D 3, E 4);
tuple_shape!(6; A 0, B 1, C 2, D 3, E 4, F 5);
tuple_shape!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_shape!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// A cleaner for fixed-length arrays with a cleaner per position.
///
/// Positions are cleaned in order; input items beyond the declared arity are
/// ignored, and missing items are read as `undefined`. The output always has
/// the declared arity. Failures are located with the position's index.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_number, as_string, as_tuple, Cleaner, Data};
/// use serde_json::json;
///
/// let point = as_tuple((as_string(), as_number(), as_number()));
///
/// let (label, x, y) = point.clean(&Data::from(json!(["a", 1, 2, "extra"]))).unwrap();
/// assert_eq!((label.as_str(), x, y), ("a", 1.0, 2.0));
///
/// let error = point.clean(&Data::from(json!(["a", 1]))).unwrap_err();
/// assert_eq!(error.to_string(), "Expected a number, got undefined at [2]");
/// ```
#[derive(Debug, Clone)]
pub struct TupleCleaner<T> {
    items: T,
    type_error_message: Option<String>,
}

impl<T: TupleShape> TupleCleaner<T> {
    /// Creates a new tuple cleaner from a tuple of positional cleaners.
    pub fn new(items: T) -> Self {
        Self {
            items,
            type_error_message: None,
        }
    }

    /// Sets a custom message for input that is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the number of declared positions.
    pub fn arity(&self) -> usize {
        self.items.arity()
    }
}

impl<T: TupleShape> Cleaner for TupleCleaner<T> {
    type Output = T::Output;

    fn clean(&self, raw: &Data) -> CleanResult<T::Output> {
        let items = expect_array(raw, self.type_error_message.as_deref())?;
        self.items.clean_items(items)
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        let items = expect_array(raw, self.type_error_message.as_deref())?;
        self.items.clean_items_to_data(items).map(Data::Array)
    }
}

/// Creates a cleaner for arrays matching a tuple of positional cleaners.
pub fn as_tuple<T: TupleShape>(items: T) -> TupleCleaner<T> {
    TupleCleaner::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::{as_boolean, as_number, as_optional, as_string};
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_single_position() {
        let cleaner = as_tuple((as_number(),));
        assert_eq!(cleaner.clean(&Data::from(json!([4]))).unwrap(), (4.0,));
        assert_eq!(cleaner.arity(), 1);
    }

    #[test]
    fn test_trailing_items_are_ignored() {
        let cleaner = as_tuple((as_string(), as_boolean()));
        let data = cleaner
            .clean_to_data(&Data::from(json!(["x", true, 1, 2])))
            .unwrap();
        assert_eq!(data, Data::from(json!(["x", true])));
    }

    #[test]
    fn test_missing_positions_are_undefined() {
        let cleaner = as_tuple((as_string(), as_optional(as_number())));
        let (name, count) = cleaner.clean(&Data::from(json!(["x"]))).unwrap();
        assert_eq!(name, "x");
        assert_eq!(count, None);
    }

    #[test]
    fn test_rejects_non_arrays() {
        let cleaner = as_tuple((as_string(), as_number()));
        let error = cleaner.clean(&Data::from("x")).unwrap_err();
        assert_eq!(error.to_string(), r#"Expected an array, got "x""#);
        assert_eq!(error.kind(), Some(ErrorKind::ArrayExpected));
    }

    #[test]
    fn test_first_failing_position_is_reported() {
        let cleaner = as_tuple((as_string(), as_number(), as_boolean()));
        let error = cleaner.clean(&Data::from(json!([1, "x", 0]))).unwrap_err();
        assert_eq!(error.to_string(), "Expected a string, got 1 at [0]");
    }

    #[test]
    fn test_custom_message() {
        let cleaner = as_tuple((as_number(), as_number())).error("points are pairs");
        let error = cleaner.clean(&Data::Null).unwrap_err();
        assert_eq!(error.to_string(), "points are pairs");
    }

    #[test]
    fn test_eight_positions() {
        let n = as_number;
        let cleaner = as_tuple((n(), n(), n(), n(), n(), n(), n(), n()));
        let clean = cleaner
            .clean(&Data::from(json!([1, 2, 3, 4, 5, 6, 7, 8])))
            .unwrap();
        assert_eq!(clean.7, 8.0);
        assert_eq!(cleaner.arity(), 8);
    }
}
