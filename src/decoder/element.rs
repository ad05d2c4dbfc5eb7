//! Decoded element view and typed payload accessors.

use std::{borrow::Cow, fmt};

use crate::{
    byte_order::{read_network_i16, read_network_i32},
    error::AccessError,
};

/// One decoded element borrowing its payload from the parent buffer.
///
/// When the policy omits type tags, [`TlvElement::tag`] is always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TlvElement<'a> {
    tag: u32,
    offset: usize,
    payload: &'a [u8],
}

impl<'a> TlvElement<'a> {
    pub(super) fn new(tag: u32, offset: usize, payload: &'a [u8]) -> Self {
        Self {
            tag,
            offset,
            payload,
        }
    }

    /// Type tag read from the header.
    #[must_use]
    pub fn tag(&self) -> u32 { self.tag }

    /// Declared payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.payload.len() }

    /// Returns true for zero-length elements.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.payload.is_empty() }

    /// Offset of the payload within the decoded buffer.
    #[must_use]
    pub fn offset(&self) -> usize { self.offset }

    /// The raw payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] { self.payload }

    /// Read the payload as a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PayloadWidthMismatch`] unless the payload is
    /// exactly one byte long.
    pub fn as_byte(&self) -> Result<u8, AccessError> {
        let [value] = self.fixed::<1>()?;
        Ok(value)
    }

    /// Read the payload as a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PayloadWidthMismatch`] unless the payload is
    /// exactly two bytes long.
    pub fn as_short(&self) -> Result<i16, AccessError> { self.fixed().map(read_network_i16) }

    /// Read the payload as a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PayloadWidthMismatch`] unless the payload is
    /// exactly four bytes long.
    pub fn as_int(&self) -> Result<i32, AccessError> { self.fixed().map(read_network_i32) }

    /// Borrow the payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidUtf8`] if the payload is not valid UTF-8.
    pub fn as_string(&self) -> Result<&'a str, AccessError> {
        Ok(std::str::from_utf8(self.payload)?)
    }

    /// Decode the payload as UTF-8, replacing invalid sequences with U+FFFD.
    #[must_use]
    pub fn as_string_lossy(&self) -> Cow<'a, str> { String::from_utf8_lossy(self.payload) }

    fn fixed<const N: usize>(&self) -> Result<[u8; N], AccessError> {
        <[u8; N]>::try_from(self.payload).map_err(|_| AccessError::PayloadWidthMismatch {
            expected: N,
            actual: self.payload.len(),
        })
    }
}

impl fmt::Display for TlvElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(T={},L={})", self.tag, self.payload.len())?;
        if !self.payload.is_empty() {
            write!(f, " 0x{}", hex::encode(self.payload))?;
        }
        Ok(())
    }
}
