//! Bidirectional cleaners.
//!
//! This module provides [`Codec`], a cleaner paired with an [`Encoder`] that
//! converts clean values back to raw form, and [`Uncleaner`], which runs any
//! cleaner tree in the encoding direction. Codecs decode unless the current
//! thread is inside an uncleaner, so a codec nested deep inside an ordinary
//! object or array follows the direction of the outermost call.
//!
//! # Example
//!
//! ```rust
//! use cleaners::{as_codec, as_fn, as_string, uncleaner, CleanError, Cleaner, Data};
//!
//! let as_hex = as_codec(
//!     as_fn(|raw: &Data| {
//!         let text = as_string().clean(raw)?;
//!         let digits = text
//!             .strip_prefix("0x")
//!             .ok_or_else(|| CleanError::custom("Expected a hex string"))?;
//!         u32::from_str_radix(digits, 16)
//!             .map(f64::from)
//!             .map_err(|_| CleanError::custom("Expected a hex string"))
//!     }),
//!     |clean: &Data| -> Result<Data, CleanError> {
//!         let number = clean.as_f64().unwrap_or_default() as u32;
//!         Ok(Data::from(format!("0x{:x}", number)))
//!     },
//! );
//!
//! assert_eq!(as_hex.clean(&Data::from("0x7f")).unwrap(), 127.0);
//! assert_eq!(uncleaner(as_hex).unclean(&Data::from(127)).unwrap(), Data::from("0x7f"));
//! ```

use crate::data::Data;
use crate::direction::{self, UncleanGuard};
use crate::error::{CleanError, CleanResult, ErrorKind};

use super::traits::Cleaner;

/// The reverse half of a codec: turns a clean value back into raw form.
///
/// Implemented for every `Fn(&Data) -> CleanResult<Data>` closure.
pub trait Encoder: Send + Sync {
    /// Converts a clean value to its raw representation.
    fn encode(&self, clean: &Data) -> CleanResult<Data>;
}

impl<F> Encoder for F
where
    F: Fn(&Data) -> CleanResult<Data> + Send + Sync,
{
    fn encode(&self, clean: &Data) -> CleanResult<Data> {
        self(clean)
    }
}

/// A cleaner that can also run in reverse.
///
/// The erased entry point used by parent cleaners decodes normally and encodes
/// while an [`Uncleaner`] is active on the current thread. The typed
/// [`clean`](Cleaner::clean) entry point can only produce decoded values, so it
/// fails with [`ErrorKind::DirectionMismatch`] while uncleaning. Custom cleaners
/// that delegate to a codec should call
/// [`clean_to_data`](Cleaner::clean_to_data) to follow the direction.
#[derive(Debug, Clone)]
pub struct Codec<D, E> {
    decode: D,
    encode: E,
}

impl<D: Cleaner, E: Encoder> Codec<D, E> {
    /// Creates a codec from its two directions.
    pub fn new(decode: D, encode: E) -> Self {
        Self { decode, encode }
    }

    /// Returns the decoding cleaner.
    pub fn decoder(&self) -> &D {
        &self.decode
    }

    /// Returns the encoder.
    pub fn encoder(&self) -> &E {
        &self.encode
    }
}

impl<D: Cleaner, E: Encoder> Cleaner for Codec<D, E> {
    type Output = D::Output;

    fn clean(&self, raw: &Data) -> CleanResult<D::Output> {
        if direction::is_uncleaning() {
            return Err(CleanError::new(
                ErrorKind::DirectionMismatch,
                "Cannot decode while uncleaning, use clean_to_data",
            ));
        }
        self.decode.clean(raw)
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        if direction::is_uncleaning() {
            self.encode.encode(raw)
        } else {
            self.decode.clean_to_data(raw)
        }
    }
}

/// Runs a cleaner tree in the encoding direction.
///
/// Every codec reached through [`unclean`](Uncleaner::unclean) encodes, and
/// every other cleaner checks the clean value as usual. The direction is
/// restored when the call returns, whether it succeeds, fails, or panics.
#[derive(Debug, Clone)]
pub struct Uncleaner<C> {
    inner: C,
}

impl<C: Cleaner> Uncleaner<C> {
    /// Wraps a cleaner.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Converts a clean value back to raw form.
    pub fn unclean(&self, clean: &Data) -> CleanResult<Data> {
        let _guard = UncleanGuard::enter();
        self.inner.clean_to_data(clean)
    }

    /// Returns the wrapped cleaner.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Cleaner> Cleaner for Uncleaner<C> {
    type Output = Data;

    fn clean(&self, raw: &Data) -> CleanResult<Data> {
        self.unclean(raw)
    }
}

/// Creates a codec from a decoding cleaner and an encoder.
pub fn as_codec<D: Cleaner, E: Encoder>(decode: D, encode: E) -> Codec<D, E> {
    Codec::new(decode, encode)
}

/// Creates the reverse direction of a cleaner.
pub fn uncleaner<C: Cleaner>(inner: C) -> Uncleaner<C> {
    Uncleaner::new(inner)
}
