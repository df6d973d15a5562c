//! Traits for cleaner polymorphism.
//!
//! This module provides the [`Cleaner`] trait implemented by every validator in
//! the crate, the object-safe [`DataCleaner`] used to store heterogeneous
//! children, and [`FnCleaner`] for lifting closures into cleaners.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::data::Data;
use crate::error::CleanResult;

/// A validator that turns untrusted input into a clean value.
///
/// `clean` is the statically-typed entry point. `clean_to_data` is the
/// type-erased one: composite cleaners drive their children through it, and
/// codecs answer it in whichever [`Direction`] the current thread is running.
/// Cleaners that contain other cleaners must override `clean_to_data` so the
/// erased path reaches their children's erased path.
///
/// The `Send + Sync` bounds allow cleaners to be built once and shared across
/// threads behind an `Arc`.
///
/// [`Direction`]: crate::direction::Direction
///
/// # Example
///
/// ```rust
/// use cleaners::{as_array, as_number, Cleaner, Data};
/// use serde_json::json;
///
/// let numbers = as_array(as_number());
/// let clean: Vec<f64> = numbers.clean(&Data::from(json!([1, 2.5]))).unwrap();
/// assert_eq!(clean, vec![1.0, 2.5]);
/// ```
pub trait Cleaner: Send + Sync {
    /// The clean value produced by a successful check.
    type Output: Into<Data>;

    /// Checks a raw value and returns the typed clean value.
    fn clean(&self, raw: &Data) -> CleanResult<Self::Output>;

    /// Checks a raw value and returns the clean value as [`Data`].
    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        self.clean(raw).map(Into::into)
    }
}

/// A type-erased cleaner producing [`Data`].
///
/// Every [`Cleaner`] is a `DataCleaner`, which lets cleaners with different
/// output types live side by side in a shape or a union.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cleaners::{as_number, as_string, DataCleaner};
///
/// let children: Vec<Arc<dyn DataCleaner>> = vec![Arc::new(as_number()), Arc::new(as_string())];
/// assert_eq!(children.len(), 2);
/// ```
pub trait DataCleaner: Send + Sync {
    /// Checks a raw value and returns the clean value as [`Data`].
    fn clean_data(&self, raw: &Data) -> CleanResult<Data>;
}

impl<C: Cleaner> DataCleaner for C {
    fn clean_data(&self, raw: &Data) -> CleanResult<Data> {
        self.clean_to_data(raw)
    }
}

impl Cleaner for Arc<dyn DataCleaner> {
    type Output = Data;

    fn clean(&self, raw: &Data) -> CleanResult<Data> {
        (**self).clean_data(raw)
    }
}

impl<C: Cleaner> Cleaner for Arc<C> {
    type Output = C::Output;

    fn clean(&self, raw: &Data) -> CleanResult<C::Output> {
        (**self).clean(raw)
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        (**self).clean_to_data(raw)
    }
}

/// A cleaner backed by a closure.
pub struct FnCleaner<F, T> {
    func: F,
    _output: PhantomData<fn() -> T>,
}

impl<F: Clone, T> Clone for FnCleaner<F, T> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            _output: PhantomData,
        }
    }
}

impl<F, T> fmt::Debug for FnCleaner<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCleaner").finish_non_exhaustive()
    }
}

impl<F, T> Cleaner for FnCleaner<F, T>
where
    F: Fn(&Data) -> CleanResult<T> + Send + Sync,
    T: Into<Data>,
{
    type Output = T;

    fn clean(&self, raw: &Data) -> CleanResult<T> {
        (self.func)(raw)
    }
}

/// Lifts a closure into a [`Cleaner`].
///
/// # Example
///
/// ```rust
/// use cleaners::{as_fn, as_string, CleanError, Cleaner, Data};
///
/// let as_word = as_fn(|raw: &Data| {
///     let text = as_string().clean(raw)?;
///     if text.contains(' ') {
///         return Err(CleanError::custom("Expected a single word"));
///     }
///     Ok(text)
/// });
///
/// assert_eq!(as_word.clean(&Data::from("hello")).unwrap(), "hello");
/// assert!(as_word.clean(&Data::from("hello world")).is_err());
/// ```
pub fn as_fn<F, T>(func: F) -> FnCleaner<F, T>
where
    F: Fn(&Data) -> CleanResult<T> + Send + Sync,
    T: Into<Data>,
{
    FnCleaner {
        func,
        _output: PhantomData,
    }
}
