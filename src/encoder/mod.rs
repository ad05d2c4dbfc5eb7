//! Fixed-capacity TLV encoder.
//!
//! [`TlvEncoder`] appends typed elements into a buffer whose capacity is set
//! once by the caller. Each append writes the element header according to the
//! [`FieldWidthPolicy`] followed by the payload, and either succeeds in full
//! or leaves the buffer untouched. Once construction is finished the encoder
//! is frozen into a read-only [`TlvBuffer`].

mod buffer;

use bytes::BytesMut;
use log::debug;

pub use self::buffer::TlvBuffer;
use crate::{
    byte_order::{write_network_i16, write_network_i32, write_network_uint},
    error::EncodeError,
    policy::FieldWidthPolicy,
};

/// Builder that serialises elements into a fixed-capacity byte buffer.
///
/// Append methods return `&mut Self` so calls can be chained with `?`.
///
/// # Examples
///
/// ```
/// use tlvframe::{FieldWidthPolicy, TlvEncoder};
///
/// let policy = FieldWidthPolicy::new(1, 1)?;
/// let mut encoder = TlvEncoder::new(policy, 15);
/// encoder.put_byte(0, 2)?.put_byte_array(2, &[0, 1, 2])?;
///
/// assert_eq!(encoder.as_bytes(), &[0, 1, 2, 2, 3, 0, 1, 2]);
/// assert_eq!(encoder.actual_length(), 8);
/// # Ok::<(), tlvframe::TlvError>(())
/// ```
#[derive(Debug)]
pub struct TlvEncoder {
    policy: FieldWidthPolicy,
    buf: BytesMut,
    position: usize,
}

impl TlvEncoder {
    /// Allocate a zeroed buffer of `capacity` bytes.
    #[must_use]
    pub fn new(policy: FieldWidthPolicy, capacity: usize) -> Self {
        debug!("allocating TLV buffer: capacity={capacity}, policy={policy:?}");
        Self {
            policy,
            buf: BytesMut::zeroed(capacity),
            position: 0,
        }
    }

    /// Encode into caller-provided storage.
    ///
    /// The encoder takes ownership of `storage` and its current length becomes
    /// the capacity. Appended elements overwrite the storage in place from
    /// offset zero; bytes past the actual length keep their previous values.
    /// [`TlvEncoder::into_storage`] hands the same storage back.
    #[must_use]
    pub fn wrap(policy: FieldWidthPolicy, storage: BytesMut) -> Self {
        debug!("wrapping TLV buffer: capacity={}, policy={policy:?}", storage.len());
        Self {
            policy,
            buf: storage,
            position: 0,
        }
    }

    /// Return the backing storage, including any bytes past the actual
    /// length, without freezing it.
    #[must_use]
    pub fn into_storage(self) -> BytesMut { self.buf }

    /// Policy used to write element headers.
    #[must_use]
    pub fn policy(&self) -> FieldWidthPolicy { self.policy }

    /// Total bytes available to this encoder.
    #[must_use]
    pub fn capacity(&self) -> usize { self.buf.len() }

    /// Number of bytes written so far.
    #[must_use]
    pub fn actual_length(&self) -> usize { self.position }

    /// Bytes still available for further elements.
    #[must_use]
    pub fn remaining(&self) -> usize { self.capacity() - self.position }

    /// The written region of the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { self.buf.get(..self.position).unwrap_or_default() }

    /// The full backing buffer together with the actual length.
    ///
    /// Bytes beyond the actual length carry no meaning.
    #[must_use]
    pub fn raw_bytes(&self) -> (&[u8], usize) { (&self.buf[..], self.position) }

    /// Append an element with a one-byte payload.
    ///
    /// # Errors
    ///
    /// See [`TlvEncoder::put_byte_array`].
    pub fn put_byte(&mut self, tag: u32, value: u8) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, &[value])
    }

    /// Append an element with a two-byte big-endian payload.
    ///
    /// # Errors
    ///
    /// See [`TlvEncoder::put_byte_array`].
    pub fn put_short(&mut self, tag: u32, value: i16) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, &write_network_i16(value))
    }

    /// Append an element with a four-byte big-endian payload.
    ///
    /// # Errors
    ///
    /// See [`TlvEncoder::put_byte_array`].
    pub fn put_int(&mut self, tag: u32, value: i32) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, &write_network_i32(value))
    }

    /// Append an element whose payload is a raw copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::TagOutOfRange`] when `tag` does not fit the type
    /// width, [`EncodeError::PayloadTooLarge`] when the payload length does not
    /// fit the length width, or [`EncodeError::BufferOverflow`] when the
    /// element exceeds the remaining capacity. The buffer is unchanged on
    /// error.
    pub fn put_byte_array(&mut self, tag: u32, bytes: &[u8]) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, bytes)
    }

    /// Append an element whose payload is the UTF-8 encoding of `text`.
    ///
    /// The declared length is the UTF-8 byte count, not the character count.
    ///
    /// # Errors
    ///
    /// See [`TlvEncoder::put_byte_array`].
    pub fn put_string(&mut self, tag: u32, text: &str) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, text.as_bytes())
    }

    /// Append a header-only element declaring a zero-length payload.
    ///
    /// # Errors
    ///
    /// See [`TlvEncoder::put_byte_array`].
    pub fn put_zero_length_element(&mut self, tag: u32) -> Result<&mut Self, EncodeError> {
        self.put_element(tag, &[])
    }

    /// Finish construction and hand out a read-only view of the buffer.
    #[must_use]
    pub fn freeze(self) -> TlvBuffer {
        debug!(
            "freezing TLV buffer: actual_length={}, capacity={}",
            self.position,
            self.buf.len()
        );
        TlvBuffer::new(self.policy, self.buf.freeze(), self.position)
    }

    fn put_element(&mut self, tag: u32, payload: &[u8]) -> Result<&mut Self, EncodeError> {
        let type_width = self.policy.type_width();
        let length_width = self.policy.length_width();

        if self.policy.max_tag().is_some_and(|max| tag > max) {
            return Err(EncodeError::TagOutOfRange {
                tag,
                width: type_width,
            });
        }
        let too_large = EncodeError::PayloadTooLarge {
            len: payload.len(),
            width: length_width,
        };
        if payload.len() > self.policy.max_payload_len() {
            return Err(too_large);
        }
        let declared = u32::try_from(payload.len()).map_err(|_| too_large)?;

        let remaining = self.remaining();
        let needed = self.policy.header_len().saturating_add(payload.len());
        if needed > remaining {
            return Err(EncodeError::BufferOverflow { needed, remaining });
        }

        let end = self.position + needed;
        let Some(dst) = self.buf.get_mut(self.position..end) else {
            return Err(EncodeError::BufferOverflow { needed, remaining });
        };
        let (type_field, rest) = dst.split_at_mut(type_width);
        let (length_field, body) = rest.split_at_mut(length_width);
        write_network_uint(tag, type_field);
        write_network_uint(declared, length_field);
        body.copy_from_slice(payload);

        self.position = end;
        Ok(self)
    }
}
