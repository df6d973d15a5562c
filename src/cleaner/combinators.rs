//! Cleaner combinators for branching and fallbacks.
//!
//! This module provides combinators that decide what to do when a child
//! cleaner does not apply:
//! - `as_either`: The first branch that accepts the input wins
//! - `as_optional`: Missing input (`null` or `undefined`) yields a fallback
//! - `as_maybe`: Any failure yields a fallback
//!
//! # Example
//!
//! ```rust
//! use cleaners::{as_array, as_either, as_maybe, as_number, as_optional, as_string, Cleaner, Data};
//! use serde_json::json;
//!
//! // Either a number or a CSS-style string
//! let size = as_either(as_number()).or(as_string());
//! assert_eq!(size.clean(&Data::from("1em")).unwrap(), Data::from("1em"));
//!
//! // A list that defaults to empty when missing
//! let tags = as_optional(as_array(as_string())).fallback_with(Vec::new);
//! assert_eq!(tags.clean(&Data::Null).unwrap(), Some(vec![]));
//!
//! // A number that falls back to zero on anything unexpected
//! let count = as_maybe(as_number()).fallback(0.0);
//! assert_eq!(count.clean(&Data::from(json!({"n": 1}))).unwrap(), Some(0.0));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::data::Data;
use crate::error::CleanResult;

use super::traits::{Cleaner, DataCleaner};

/// What optional and maybe cleaners produce instead of a clean value.
///
/// A plain value is cloned on every use. A thunk is called on every use, so
/// each result is freshly built and never shared between calls.
pub enum Fallback<T> {
    /// No fallback; the cleaner produces `None`.
    Absent,
    /// A value cloned for each use.
    Value(T),
    /// A function called for each use.
    With(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Fallback<T> {
    /// Produces the fallback value, if there is one.
    pub fn get(&self) -> Option<T> {
        match self {
            Fallback::Absent => None,
            Fallback::Value(value) => Some(value.clone()),
            Fallback::With(make) => Some(make()),
        }
    }
}

impl<T> Default for Fallback<T> {
    fn default() -> Self {
        Fallback::Absent
    }
}

impl<T: Clone> Clone for Fallback<T> {
    fn clone(&self) -> Self {
        match self {
            Fallback::Absent => Fallback::Absent,
            Fallback::Value(value) => Fallback::Value(value.clone()),
            Fallback::With(make) => Fallback::With(Arc::clone(make)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Fallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Absent => f.write_str("Absent"),
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::With(_) => f.write_str("With(..)"),
        }
    }
}

/// A union of cleaners tried in declaration order.
///
/// The first branch to accept the input decides the result. Failures of every
/// branch but the last are discarded; if all branches fail, the last branch's
/// failure is returned exactly as that branch produced it.
#[derive(Clone)]
pub struct EitherCleaner {
    init: Vec<Arc<dyn DataCleaner>>,
    last: Arc<dyn DataCleaner>,
}

impl EitherCleaner {
    /// Adds another branch, tried after every branch declared so far.
    pub fn or<C>(mut self, cleaner: C) -> Self
    where
        C: Cleaner + 'static,
    {
        let previous = std::mem::replace(&mut self.last, Arc::new(cleaner));
        self.init.push(previous);
        self
    }

    /// Returns the number of branches.
    pub fn branches(&self) -> usize {
        self.init.len() + 1
    }
}

impl fmt::Debug for EitherCleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EitherCleaner")
            .field("branches", &self.branches())
            .finish()
    }
}

impl Cleaner for EitherCleaner {
    type Output = Data;

    fn clean(&self, raw: &Data) -> CleanResult<Data> {
        for branch in &self.init {
            if let Ok(clean) = branch.clean_data(raw) {
                return Ok(clean);
            }
        }
        self.last.clean_data(raw)
    }
}

/// Substitutes a fallback for missing input.
///
/// Input that is `null` or `undefined` produces the fallback (or `None` when
/// there is none) without consulting the inner cleaner. Anything else is
/// handed to the inner cleaner unchanged, and its failures pass through with
/// no location added.
#[derive(Debug, Clone)]
pub struct OptionalCleaner<C: Cleaner> {
    inner: C,
    fallback: Fallback<C::Output>,
}

impl<C> OptionalCleaner<C>
where
    C: Cleaner,
    C::Output: Clone,
{
    /// Creates a new optional cleaner with no fallback.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            fallback: Fallback::Absent,
        }
    }

    /// Uses a clone of `value` for missing input.
    pub fn fallback(mut self, value: impl Into<C::Output>) -> Self {
        self.fallback = Fallback::Value(value.into());
        self
    }

    /// Calls `make` for missing input, building a fresh fallback each time.
    pub fn fallback_with<F>(mut self, make: F) -> Self
    where
        F: Fn() -> C::Output + Send + Sync + 'static,
    {
        self.fallback = Fallback::With(Arc::new(make));
        self
    }

    /// Returns the inner cleaner.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> Cleaner for OptionalCleaner<C>
where
    C: Cleaner,
    C::Output: Clone + Send + Sync,
{
    type Output = Option<C::Output>;

    fn clean(&self, raw: &Data) -> CleanResult<Self::Output> {
        if raw.is_missing() {
            return Ok(self.fallback.get());
        }
        self.inner.clean(raw).map(Some)
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        if raw.is_missing() {
            return Ok(self.fallback.get().into());
        }
        self.inner.clean_to_data(raw)
    }
}

/// Substitutes a fallback for any failure.
///
/// The inner cleaner's failure, whatever it is, is discarded and the fallback
/// (or `None`) is produced instead. This makes the cleaner total: it never
/// fails.
#[derive(Debug, Clone)]
pub struct MaybeCleaner<C: Cleaner> {
    inner: C,
    fallback: Fallback<C::Output>,
}

impl<C> MaybeCleaner<C>
where
    C: Cleaner,
    C::Output: Clone,
{
    /// Creates a new maybe cleaner with no fallback.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            fallback: Fallback::Absent,
        }
    }

    /// Uses a clone of `value` when the inner cleaner fails.
    pub fn fallback(mut self, value: impl Into<C::Output>) -> Self {
        self.fallback = Fallback::Value(value.into());
        self
    }

    /// Calls `make` when the inner cleaner fails, building a fresh fallback each time.
    pub fn fallback_with<F>(mut self, make: F) -> Self
    where
        F: Fn() -> C::Output + Send + Sync + 'static,
    {
        self.fallback = Fallback::With(Arc::new(make));
        self
    }

    /// Returns the inner cleaner.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> Cleaner for MaybeCleaner<C>
where
    C: Cleaner,
    C::Output: Clone + Send + Sync,
{
    type Output = Option<C::Output>;

    fn clean(&self, raw: &Data) -> CleanResult<Self::Output> {
        match self.inner.clean(raw) {
            Ok(clean) => Ok(Some(clean)),
            Err(error) => {
                tracing::debug!(%error, "substituting fallback for failed value");
                Ok(self.fallback.get())
            }
        }
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        match self.inner.clean_to_data(raw) {
            Ok(clean) => Ok(clean),
            Err(error) => {
                tracing::debug!(%error, "substituting fallback for failed value");
                Ok(self.fallback.get().into())
            }
        }
    }
}

/// Creates a union starting with `first`; add branches with [`EitherCleaner::or`].
///
/// # Example
///
/// ```rust
/// use cleaners::{as_either, as_number, as_string, Cleaner, Data};
///
/// let size = as_either(as_number()).or(as_string());
/// let error = size.clean(&Data::Null).unwrap_err();
/// assert_eq!(error.to_string(), "Expected a string, got null");
/// ```
pub fn as_either<C>(first: C) -> EitherCleaner
where
    C: Cleaner + 'static,
{
    EitherCleaner {
        init: Vec::new(),
        last: Arc::new(first),
    }
}

/// Creates a cleaner that accepts missing input.
pub fn as_optional<C>(inner: C) -> OptionalCleaner<C>
where
    C: Cleaner,
    C::Output: Clone,
{
    OptionalCleaner::new(inner)
}

/// Creates a cleaner that never fails, replacing failures with a fallback.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_maybe, as_string, Cleaner, Data};
///
/// let nickname = as_maybe(as_string()).fallback("anonymous");
/// assert_eq!(nickname.clean(&Data::from(7)).unwrap().as_deref(), Some("anonymous"));
/// ```
pub fn as_maybe<C>(inner: C) -> MaybeCleaner<C>
where
    C: Cleaner,
    C::Output: Clone,
{
    MaybeCleaner::new(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::{as_array, as_fn, as_number, as_string};
    use crate::error::{CleanError, ErrorKind};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_either_first_success_wins() {
        let cleaner = as_either(as_number()).or(as_string());
        assert_eq!(cleaner.clean(&Data::from(1)).unwrap(), Data::from(1));
        assert_eq!(cleaner.clean(&Data::from("1em")).unwrap(), Data::from("1em"));
        assert_eq!(cleaner.branches(), 2);
    }

    #[test]
    fn test_either_reports_last_failure() {
        let cleaner = as_either(as_number()).or(as_string());
        let error = cleaner.clean(&Data::Null).unwrap_err();
        assert_eq!(error.to_string(), "Expected a string, got null");
    }

    #[test]
    fn test_either_stops_at_first_match() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            as_fn(move |raw: &Data| {
                calls.fetch_add(1, Ordering::SeqCst);
                as_number().clean(raw)
            })
        };
        let cleaner = as_either(as_string()).or(counted);
        cleaner.clean(&Data::from("text")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_either_single_branch_is_transparent() {
        let error = as_either(as_number()).clean(&Data::from("x")).unwrap_err();
        assert_eq!(error.to_string(), r#"Expected a number, got "x""#);
    }

    #[test]
    fn test_optional_without_fallback() {
        let cleaner = as_optional(as_string());
        assert_eq!(cleaner.clean(&Data::Null).unwrap(), None);
        assert_eq!(cleaner.clean(&Data::Undefined).unwrap(), None);
        assert_eq!(cleaner.clean(&Data::from("x")).unwrap().as_deref(), Some("x"));
        assert_eq!(cleaner.clean_to_data(&Data::Null).unwrap(), Data::Undefined);
    }

    #[test]
    fn test_optional_passes_failures_unlocated() {
        let error = as_optional(as_string()).clean(&Data::from(1)).unwrap_err();
        assert_eq!(error.to_string(), "Expected a string, got 1");
        assert_eq!(error.as_invalid().unwrap().insert_step_at(), None);
    }

    #[test]
    fn test_optional_fallback_value() {
        let cleaner = as_optional(as_number()).fallback(1.0);
        assert_eq!(cleaner.clean(&Data::Null).unwrap(), Some(1.0));
        assert_eq!(cleaner.clean_to_data(&Data::Undefined).unwrap(), Data::from(1));
    }

    #[test]
    fn test_optional_fallback_thunk_called_per_use() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cleaner = {
            let calls = Arc::clone(&calls);
            as_optional(as_array(as_number())).fallback_with(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Vec::new()
            })
        };
        let first = cleaner.clean(&Data::Undefined).unwrap().unwrap();
        let second = cleaner.clean(&Data::Undefined).unwrap().unwrap();
        assert!(first.is_empty() && second.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cleaner.clean(&Data::from(json!([1]))).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_maybe_swallows_any_failure() {
        let cleaner = as_maybe(as_number()).fallback(-1.0);
        assert_eq!(cleaner.clean(&Data::from("x")).unwrap(), Some(-1.0));
        assert_eq!(cleaner.clean(&Data::from(2)).unwrap(), Some(2.0));
        assert_eq!(as_maybe(as_number()).clean(&Data::Null).unwrap(), None);
    }

    #[test]
    fn test_maybe_swallows_other_errors() {
        let failing = as_fn(|_: &Data| -> CleanResult<f64> {
            Err(CleanError::other(std::fmt::Error))
        });
        assert_eq!(as_maybe(failing).clean(&Data::Null).unwrap(), None);
    }

    #[test]
    fn test_maybe_keeps_custom_failures_out() {
        let failing = as_fn(|_: &Data| -> CleanResult<String> {
            Err(CleanError::new(ErrorKind::Custom, "nope"))
        });
        let cleaner = as_maybe(failing).fallback("default");
        assert_eq!(cleaner.clean_to_data(&Data::Null).unwrap(), Data::from("default"));
    }

    #[test]
    fn test_fallback_debug_hides_thunk() {
        let fallback: Fallback<f64> = Fallback::With(Arc::new(|| 1.0));
        assert_eq!(format!("{:?}", fallback), "With(..)");
        assert_eq!(format!("{:?}", Fallback::Value(2.0)), "Value(2.0)");
    }
}
