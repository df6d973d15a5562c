//! Path segments for locating failures in nested structures.
//!
//! This module provides [`PathSegment`], one structural step that a composite
//! cleaner contributes to a failure message as the call stack unwinds. The
//! segments render as `.field`, `["quoted key"]`, `[0]`, or `JSON.parse()`.

use std::fmt::{self, Display};

/// A single step in the location of a failure.
///
/// Segments are spliced into an error message by [`CleanError::locate`]
/// rather than collected into a list, so each segment also knows how far
/// the insertion point should move after it is written.
///
/// [`CleanError::locate`]: crate::CleanError::locate
///
/// # Example
///
/// ```rust
/// use cleaners::PathSegment;
///
/// assert_eq!(PathSegment::field("user").to_string(), ".user");
/// assert_eq!(PathSegment::key("odd \"item\"").to_string(), r#"["odd \"item\""]"#);
/// assert_eq!(PathSegment::index(3).to_string(), "[3]");
/// assert_eq!(PathSegment::call("JSON.parse").to_string(), "JSON.parse()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A positional step into an array or tuple (e.g., `[0]`, `[42]`)
    Index(usize),
    /// A named property of a shaped object (e.g., `.email`)
    Field(String),
    /// An arbitrary key of a map-like object, JSON-quoted (e.g., `["a b"]`)
    Key(String),
    /// A transformation wrapping the inner location (e.g., `JSON.parse()`)
    Call(String),
}

impl PathSegment {
    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new quoted-key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new call segment.
    pub fn call(name: impl Into<String>) -> Self {
        PathSegment::Call(name.into())
    }

    /// Returns how far the insertion point advances after this segment is written.
    ///
    /// Ordinary segments return 0, so the next (outer) segment lands in front
    /// of them. A call segment returns the byte length of `name(`, so outer
    /// segments land between its parentheses.
    pub fn insert_offset(&self) -> usize {
        match self {
            PathSegment::Call(name) => name.len() + 1,
            _ => 0,
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Key(name) => {
                write!(f, "[{}]", serde_json::Value::String(name.clone()))
            }
            PathSegment::Call(name) => write!(f, "{}()", name),
        }
    }
}
