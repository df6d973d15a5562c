//! Array cleaner.
//!
//! This module provides [`ArrayCleaner`] for validating sequences whose items
//! all share one cleaner.

use crate::data::Data;
use crate::error::{CleanError, CleanResult, ErrorKind};
use crate::path::PathSegment;

use super::traits::Cleaner;

/// A cleaner for arrays of a single item type.
///
/// Items are cleaned in index order into a new array of the same length. The
/// first failing item stops the check, and its failure is located with the
/// item's index so nested arrays produce paths like `[2][0]`.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_array, as_string, Cleaner, Data};
/// use serde_json::json;
///
/// let tags = as_array(as_string());
///
/// assert_eq!(tags.clean(&Data::from(json!(["hey"]))).unwrap(), vec!["hey"]);
///
/// let error = tags.clean(&Data::from(json!([1]))).unwrap_err();
/// assert_eq!(error.to_string(), "Expected a string, got 1 at [0]");
/// ```
#[derive(Debug, Clone)]
pub struct ArrayCleaner<C> {
    item: C,
    type_error_message: Option<String>,
}

impl<C: Cleaner> ArrayCleaner<C> {
    /// Creates a new array cleaner with the given item cleaner.
    pub fn new(item: C) -> Self {
        Self {
            item,
            type_error_message: None,
        }
    }

    /// Sets a custom message for input that is not an array.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleaners::{as_array, as_number, Cleaner, Data};
    ///
    /// let scores = as_array(as_number()).error("scores must be a list");
    /// let error = scores.clean(&Data::from("nope")).unwrap_err();
    /// assert_eq!(error.to_string(), "scores must be a list");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the item cleaner.
    pub fn item(&self) -> &C {
        &self.item
    }

    fn clean_items<T>(
        &self,
        raw: &Data,
        clean_item: impl Fn(&Data) -> CleanResult<T>,
    ) -> CleanResult<Vec<T>> {
        let items = expect_array(raw, self.type_error_message.as_deref())?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                clean_item(item).map_err(|e| e.locate(&PathSegment::index(index)))
            })
            .collect()
    }
}

impl<C: Cleaner> Cleaner for ArrayCleaner<C> {
    type Output = Vec<C::Output>;

    fn clean(&self, raw: &Data) -> CleanResult<Self::Output> {
        self.clean_items(raw, |item| self.item.clean(item))
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        self.clean_items(raw, |item| self.item.clean_to_data(item))
            .map(Data::Array)
    }
}

/// Returns the items of an array, or the array type-mismatch failure.
pub(crate) fn expect_array<'a>(raw: &'a Data, message: Option<&str>) -> CleanResult<&'a [Data]> {
    raw.as_array().ok_or_else(|| match message {
        Some(message) => CleanError::new(ErrorKind::ArrayExpected, message),
        None => CleanError::expected(ErrorKind::ArrayExpected, "an array", raw),
    })
}

/// Creates a cleaner for arrays whose items pass `item`.
pub fn as_array<C: Cleaner>(item: C) -> ArrayCleaner<C> {
    ArrayCleaner::new(item)
}
