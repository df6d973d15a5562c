//! JSON text codec.
//!
//! Decoding requires a string, parses it as JSON, and cleans the parsed value
//! with the inner cleaner. Failures inside the parsed value are located behind
//! a `JSON.parse()` segment, e.g. `Expected a number, got null at JSON.parse()[0]`.
//! Encoding runs the inner cleaner in reverse and serializes the result.

use std::fmt;
use std::sync::Arc;

use crate::data::Data;
use crate::error::{CleanError, CleanResult, ErrorKind};
use crate::path::PathSegment;

use super::codec::{Codec, Encoder};
use super::primitives::as_string;
use super::traits::Cleaner;

/// Name of the location segment for values inside JSON text.
const PARSE_CALL: &str = "JSON.parse";

/// Decodes JSON text and cleans its contents.
pub struct JsonDecoder<C> {
    inner: Arc<C>,
}

impl<C: Cleaner> JsonDecoder<C> {
    fn parse(&self, raw: &Data) -> CleanResult<Data> {
        let text = as_string().clean(raw)?;
        Data::parse_json(&text).map_err(|error| {
            tracing::debug!(%error, "rejecting malformed JSON text");
            CleanError::new(ErrorKind::JsonSyntax, error.to_string())
        })
    }
}

impl<C> Clone for JsonDecoder<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for JsonDecoder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDecoder").finish_non_exhaustive()
    }
}

impl<C: Cleaner> Cleaner for JsonDecoder<C> {
    type Output = C::Output;

    fn clean(&self, raw: &Data) -> CleanResult<C::Output> {
        let parsed = self.parse(raw)?;
        self.inner
            .clean(&parsed)
            .map_err(|e| e.locate(&PathSegment::call(PARSE_CALL)))
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        let parsed = self.parse(raw)?;
        self.inner
            .clean_to_data(&parsed)
            .map_err(|e| e.locate(&PathSegment::call(PARSE_CALL)))
    }
}

/// Serializes clean values as JSON text.
///
/// Values with no JSON form, such as `undefined`, encode to `undefined`.
pub struct JsonEncoder<C> {
    inner: Arc<C>,
}

impl<C> Clone for JsonEncoder<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for JsonEncoder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonEncoder").finish_non_exhaustive()
    }
}

impl<C: Cleaner> Encoder for JsonEncoder<C> {
    fn encode(&self, clean: &Data) -> CleanResult<Data> {
        let raw = self.inner.clean_to_data(clean)?;
        Ok(raw.to_json_string().map_or(Data::Undefined, Data::String))
    }
}

/// The JSON text codec over an inner cleaner.
pub type JsonCodec<C> = Codec<JsonDecoder<C>, JsonEncoder<C>>;

/// Creates a codec for JSON text whose contents pass `inner`.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_array, as_json, as_number, Cleaner, Data};
///
/// let as_numbers_file = as_json(as_array(as_number()));
/// assert_eq!(as_numbers_file.clean(&Data::from("[1, 2]")).unwrap(), vec![1.0, 2.0]);
///
/// let error = as_numbers_file.clean(&Data::from("[null]")).unwrap_err();
/// assert_eq!(error.to_string(), "Expected a number, got null at JSON.parse()[0]");
/// ```
pub fn as_json<C: Cleaner>(inner: C) -> JsonCodec<C> {
    let inner = Arc::new(inner);
    Codec::new(
        JsonDecoder {
            inner: Arc::clone(&inner),
        },
        JsonEncoder { inner },
    )
}
