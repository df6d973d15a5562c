//! Cleaning failure types.
//!
//! This module provides [`InvalidValue`] for message-bearing failures that can
//! be located within nested input, and [`CleanError`], the error every cleaner
//! returns.

use std::error::Error as StdError;

use crate::data::Data;
use crate::path::PathSegment;

/// Result type returned by every cleaner.
pub type CleanResult<T> = Result<T, CleanError>;

/// The kind of check that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value was not of the expected primitive kind.
    TypeMismatch,
    /// The value was not an array.
    ArrayExpected,
    /// The value was not an object.
    ObjectExpected,
    /// The value was not one of the accepted literals.
    LiteralMismatch,
    /// The value could not be read as a calendar date.
    InvalidDateFormat,
    /// The text was not well-formed JSON.
    JsonSyntax,
    /// A codec was called through its typed entry point while uncleaning.
    DirectionMismatch,
    /// A failure raised by a caller-supplied cleaner.
    Custom,
}

impl ErrorKind {
    /// Returns the machine-readable code for this kind (e.g., `invalid_type`).
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::ArrayExpected => "expected_array",
            ErrorKind::ObjectExpected => "expected_object",
            ErrorKind::LiteralMismatch => "literal_mismatch",
            ErrorKind::InvalidDateFormat => "invalid_date",
            ErrorKind::JsonSyntax => "json_syntax",
            ErrorKind::DirectionMismatch => "direction_mismatch",
            ErrorKind::Custom => "custom",
        }
    }
}

/// A message-bearing failure that composite cleaners can locate.
///
/// The message starts as a plain description such as `Expected a string, got 1`.
/// The first call to [`locate`](InvalidValue::locate) appends `" at "` and
/// remembers the byte offset right after it. Every later call splices its
/// segment in at that offset, so segments added while unwinding read from the
/// outermost to the innermost.
///
/// # Example
///
/// ```rust
/// use cleaners::{ErrorKind, InvalidValue, PathSegment};
///
/// let error = InvalidValue::new(ErrorKind::TypeMismatch, "Expected a number")
///     .locate(&PathSegment::index(0))
///     .locate(&PathSegment::key("odd \"item\""))
///     .locate(&PathSegment::field("map"));
///
/// assert_eq!(error.message(), r#"Expected a number at .map["odd \"item\""][0]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidValue {
    kind: ErrorKind,
    message: String,
    insert_step_at: Option<usize>,
}

impl InvalidValue {
    /// Creates a new unlocated failure.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            insert_step_at: None,
        }
    }

    /// Returns the kind of check that failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the machine-readable code for the failed check.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the full message, including any location.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset where the next segment will be inserted,
    /// or `None` if no segment has been added yet.
    pub fn insert_step_at(&self) -> Option<usize> {
        self.insert_step_at
    }

    /// Splices a path segment into the message and returns the located failure.
    pub fn locate(mut self, segment: &PathSegment) -> Self {
        let at = match self.insert_step_at {
            Some(at) => at,
            None => {
                self.message.push_str(" at ");
                self.message.len()
            }
        };
        self.message.insert_str(at, &segment.to_string());
        self.insert_step_at = Some(at + segment.insert_offset());
        self
    }
}

/// The error returned by cleaners.
///
/// `Invalid` failures carry a message that composite cleaners annotate with
/// the location of the bad value. `Other` wraps an arbitrary error raised by a
/// caller-supplied cleaner; it has no message to edit, so it passes through
/// every combinator unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// A value did not have the expected shape.
    #[error(transparent)]
    Invalid(#[from] InvalidValue),

    /// An opaque failure from caller code.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync + 'static>),
}

impl CleanError {
    /// Creates a failure of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        CleanError::Invalid(InvalidValue::new(kind, message))
    }

    /// Creates a failure for a value of the wrong kind: `Expected <expected>, got <value>`.
    pub fn expected(kind: ErrorKind, expected: &str, got: &Data) -> Self {
        Self::new(kind, format!("Expected {}, got {}", expected, got.show()))
    }

    /// Creates a caller-defined failure that can still be located.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleaners::{CleanError, ErrorKind};
    ///
    /// let error = CleanError::custom("Expected a hex string");
    /// assert_eq!(error.kind(), Some(ErrorKind::Custom));
    /// assert_eq!(error.to_string(), "Expected a hex string");
    /// ```
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom, message)
    }

    /// Wraps an arbitrary error. It will never be annotated with a location.
    pub fn other<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        CleanError::Other(Box::new(error))
    }

    /// Adds a location segment to an `Invalid` failure; `Other` is returned untouched.
    pub fn locate(self, segment: &PathSegment) -> Self {
        match self {
            CleanError::Invalid(invalid) => CleanError::Invalid(invalid.locate(segment)),
            other => other,
        }
    }

    /// Returns the failed check's kind, or `None` for an opaque failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CleanError::Invalid(invalid) => Some(invalid.kind()),
            CleanError::Other(_) => None,
        }
    }

    /// Returns the located failure, if this is one.
    pub fn as_invalid(&self) -> Option<&InvalidValue> {
        match self {
            CleanError::Invalid(invalid) => Some(invalid),
            CleanError::Other(_) => None,
        }
    }
}

// Cleaners are shared across threads, and so are the failures they return.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CleanError>();
    assert_sync::<CleanError>();
};
