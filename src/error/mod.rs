//! Error types for cleaning failures.
//!
//! This module provides the failure type every cleaner returns, along with the
//! path-annotation logic that lets composite cleaners splice their location
//! into a child's message as the failure propagates outward.

mod clean_error;

pub use clean_error::{CleanError, CleanResult, ErrorKind, InvalidValue};
