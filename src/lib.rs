//! # Cleaners
//!
//! Composable validators for untrusted, dynamically-typed data.
//!
//! ## Overview
//!
//! A cleaner takes a raw [`Data`] value, such as parsed JSON from a network
//! request, and either returns a clean, typed value or fails with one
//! descriptive error. Cleaners compose: arrays, objects, tuples, and unions are
//! built from smaller cleaners, and a failure deep inside the input reports
//! where it happened (`Expected a string, got 1 at .users[2].name`).
//!
//! Some cleaners are codecs that also run in reverse. Wrapping a cleaner tree
//! in [`uncleaner`] converts clean values back to raw form, with every nested
//! codec (dates, JSON text) encoding instead of decoding.
//!
//! ## Core Types
//!
//! - [`Data`]: The dynamic value model that cleaners read and produce
//! - [`Cleaner`]: The trait every validator implements
//! - [`CleanError`]: A single located failure, or an opaque caller error
//! - [`PathSegment`]: One step of a failure's location (`[0]`, `.name`, `["key"]`)
//! - [`Shape`]: The ordered property cleaners of an object
//!
//! ## Example
//!
//! ```rust
//! use cleaners::{as_date, as_json, as_object, uncleaner, Cleaner, Data, Shape};
//!
//! let as_file = as_json(as_object(Shape::new().field("lastLogin", as_date())));
//! let raw = Data::from(r#"{"lastLogin":"2020-02-20T00:00:00.000Z"}"#);
//!
//! // Decode the file into clean values
//! let clean = as_file.clean(&raw).unwrap();
//! assert!(clean["lastLogin"].as_date().is_some());
//!
//! // And encode them back to the same text
//! let was_file = uncleaner(as_file);
//! assert_eq!(was_file.unclean(&Data::Object(clean)).unwrap(), raw);
//! ```

pub mod data;
pub mod direction;
pub mod error;
pub mod path;

mod cleaner;

pub use cleaner::*;
pub use data::{Data, Object};
pub use direction::{Direction, UncleanGuard};
pub use error::{CleanError, CleanResult, ErrorKind, InvalidValue};
pub use path::PathSegment;
