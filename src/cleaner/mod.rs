//! Cleaner definitions.
//!
//! This module provides the cleaners that turn untrusted [`Data`] into clean
//! values. Each cleaner checks one kind of value; composite cleaners (arrays,
//! objects, tuples, unions, codecs) wrap other cleaners and locate a child's
//! failure within the input before returning it. Checking stops at the first
//! failure.
//!
//! # Example
//!
//! ```rust
//! use cleaners::{as_array, as_map, as_number, as_object, Cleaner, Data, Shape};
//! use serde_json::json;
//!
//! let as_doc = as_object(Shape::new().field("map", as_map(as_array(as_number()))));
//!
//! let error = as_doc
//!     .clean(&Data::from(json!({"map": {"odd \"item\"": ["1"]}})))
//!     .unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     r#"Expected a number, got "1" at .map["odd \"item\""][0]"#
//! );
//! ```
//!
//! [`Data`]: crate::Data

mod array;
mod codec;
mod combinators;
mod date;
mod json;
mod object;
mod primitives;
mod traits;
mod tuple;
mod value;

pub use array::{as_array, ArrayCleaner};
pub use codec::{as_codec, uncleaner, Codec, Encoder, Uncleaner};
pub use combinators::{
    as_either, as_maybe, as_optional, EitherCleaner, Fallback, MaybeCleaner, OptionalCleaner,
};
pub use date::{as_date, DateCodec, DateDecoder, DateEncoder};
pub use json::{as_json, JsonCodec, JsonDecoder, JsonEncoder};
pub use object::{as_map, as_object, MapCleaner, ObjectCleaner, Shape};
pub use primitives::{
    as_boolean, as_none, as_null, as_number, as_string, as_undefined, as_unknown, BooleanCleaner,
    NumberCleaner, StringCleaner, UnknownCleaner,
};
pub use traits::{as_fn, Cleaner, DataCleaner, FnCleaner};
pub use tuple::{as_tuple, TupleCleaner, TupleShape};
pub use value::{as_value, as_values, ValueCleaner};
