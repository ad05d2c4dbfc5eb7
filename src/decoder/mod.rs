//! Lazy traversal of encoded TLV buffers.
//!
//! [`TlvIterable`] borrows the valid region of a buffer and hands out a fresh
//! [`Elements`] cursor for every traversal. Elements are views into the
//! borrowed bytes; nothing is copied while iterating.
//!
//! Traversal ends cleanly only when the cursor lands exactly on the actual
//! length. Trailing bytes that cannot form a complete header, or a declared
//! payload that runs past the end, surface as [`DecodeError`]s.

mod element;

use std::{fmt, iter::FusedIterator};

use log::warn;

pub use self::element::TlvElement;
use crate::{byte_order::read_network_uint, error::DecodeError, policy::FieldWidthPolicy};

/// Restartable, read-only view of an encoded buffer.
///
/// The iterable keeps no traversal state, so it can be shared and walked from
/// several threads at once.
///
/// # Examples
///
/// ```
/// use tlvframe::{FieldWidthPolicy, TlvIterable};
///
/// let policy = FieldWidthPolicy::new(1, 1)?;
/// let buffer = [0, 1, 2, 2, 3, 0, 1, 2, 0xaa, 0xbb];
/// let iterable = TlvIterable::new(policy, &buffer, 8)?;
///
/// let elements = iterable.to_vec()?;
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[0].as_byte()?, 2);
/// assert_eq!(elements[1].as_bytes(), &[0, 1, 2]);
/// # Ok::<(), tlvframe::TlvError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TlvIterable<'a> {
    policy: FieldWidthPolicy,
    data: &'a [u8],
}

impl<'a> TlvIterable<'a> {
    /// Borrow the first `actual_length` bytes of `buffer` for decoding.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLength`] if `actual_length` exceeds the
    /// buffer's size.
    pub fn new(
        policy: FieldWidthPolicy,
        buffer: &'a [u8],
        actual_length: usize,
    ) -> Result<Self, DecodeError> {
        let data = buffer
            .get(..actual_length)
            .ok_or(DecodeError::InvalidLength {
                length: actual_length,
                capacity: buffer.len(),
            })?;
        Ok(Self::over_valid(policy, data))
    }

    pub(crate) fn over_valid(policy: FieldWidthPolicy, data: &'a [u8]) -> Self { Self { policy, data } }

    /// Policy used to read element headers.
    #[must_use]
    pub fn policy(&self) -> FieldWidthPolicy { self.policy }

    /// Number of bytes that will be traversed.
    #[must_use]
    pub fn actual_length(&self) -> usize { self.data.len() }

    /// Start a new traversal from offset zero.
    #[must_use]
    pub fn elements(&self) -> Elements<'a> {
        Elements {
            policy: self.policy,
            data: self.data,
            offset: 0,
            failed: false,
        }
    }

    /// Returns true when the whole buffer decodes without error.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.elements().all(|element| element.is_ok()) }

    /// Decode every element, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] met during traversal.
    pub fn to_vec(&self) -> Result<Vec<TlvElement<'a>>, DecodeError> { self.elements().collect() }
}

impl<'a> IntoIterator for TlvIterable<'a> {
    type Item = Result<TlvElement<'a>, DecodeError>;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter { self.elements() }
}

impl<'a> IntoIterator for &TlvIterable<'a> {
    type Item = Result<TlvElement<'a>, DecodeError>;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter { self.elements() }
}

impl fmt::Display for TlvIterable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.elements().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match element {
                Ok(element) => write!(f, "{element}")?,
                Err(err) => write!(f, "<{err}>")?,
            }
        }
        f.write_str("]")
    }
}

/// Forward-only cursor over the elements of a [`TlvIterable`].
///
/// Yields `Ok` for each well-formed element and at most one `Err`, after which
/// it is exhausted.
#[derive(Clone, Debug)]
pub struct Elements<'a> {
    policy: FieldWidthPolicy,
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Elements<'a> {
    /// Byte offset of the next element header.
    #[must_use]
    pub fn offset(&self) -> usize { self.offset }

    fn fail(&mut self, err: DecodeError) -> Option<Result<TlvElement<'a>, DecodeError>> {
        warn!("TLV decode stopped: error={err}");
        self.failed = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Result<TlvElement<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset == self.data.len() {
            return None;
        }

        let offset = self.offset;
        let rest = self.data.get(offset..).unwrap_or_default();
        let header_len = self.policy.header_len();
        let Some((header, body)) = rest.split_at_checked(header_len) else {
            return self.fail(DecodeError::TruncatedHeader {
                offset,
                have: rest.len(),
                need: header_len,
            });
        };

        let (type_field, length_field) = header.split_at(self.policy.type_width());
        let tag = read_network_uint(type_field);
        let declared = usize::try_from(read_network_uint(length_field)).unwrap_or(usize::MAX);

        let payload_offset = offset + header_len;
        let Some(payload) = body.get(..declared) else {
            return self.fail(DecodeError::TruncatedPayload {
                offset: payload_offset,
                declared,
                have: body.len(),
            });
        };

        self.offset = payload_offset + declared;
        Some(Ok(TlvElement::new(tag, payload_offset, payload)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.data.len() - self.offset;
        (0, Some(remaining.div_ceil(self.policy.header_len())))
    }
}

impl FusedIterator for Elements<'_> {}

#[cfg(test)]
mod tests;
