//! Error types for the TLV codec.
//!
//! Each stage of the codec reports its own error enum so callers can match on
//! the exact invariant that was violated:
//!
//! - [`InvalidFieldWidth`]: a field-width policy was built from an illegal width.
//! - [`EncodeError`]: an append could not be written into the encoder's buffer.
//! - [`DecodeError`]: a buffer could not be traversed as a sequence of elements.
//! - [`AccessError`]: a typed accessor disagreed with an element's payload.
//! - [`TlvError`]: umbrella enum wrapping all of the above.
//!
//! None of these errors leave the codec in a partially updated state.

use std::{fmt, str::Utf8Error};

use thiserror::Error;

/// Header sub-field whose width was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidthField {
    /// The type tag sub-field.
    Type,
    /// The payload length sub-field.
    Length,
}

impl fmt::Display for WidthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Length => f.write_str("length"),
        }
    }
}

/// A field-width policy was requested with a width outside its legal set.
///
/// Type widths must be one of `0, 1, 2, 4`; length widths one of `1, 2, 4`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid {field} field width: {width}")]
pub struct InvalidFieldWidth {
    /// Which sub-field was rejected.
    pub field: WidthField,
    /// The rejected width as supplied by the caller.
    pub width: i64,
}

/// Errors produced while appending elements to an encoder.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The element does not fit in the remaining capacity.
    #[error("buffer overflow: element needs {needed} bytes, {remaining} remaining")]
    BufferOverflow {
        /// Header plus payload bytes required by the element.
        needed: usize,
        /// Bytes left between the cursor and the capacity.
        remaining: usize,
    },

    /// The type tag cannot be represented in the configured type width.
    #[error("type tag {tag} does not fit in {width} byte(s)")]
    TagOutOfRange {
        /// Rejected tag.
        tag: u32,
        /// Configured type width in bytes.
        width: usize,
    },

    /// The payload length cannot be represented in the configured length width.
    #[error("payload of {len} bytes does not fit a {width}-byte length field")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: usize,
        /// Configured length width in bytes.
        width: usize,
    },
}

/// Errors produced while traversing an encoded buffer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The declared actual length exceeds the supplied buffer.
    #[error("actual length {length} exceeds buffer capacity {capacity}")]
    InvalidLength {
        /// Declared number of valid bytes.
        length: usize,
        /// Size of the supplied buffer.
        capacity: usize,
    },

    /// Fewer bytes than a full element header remain.
    #[error("truncated header at offset {offset}: have {have}, need {need}")]
    TruncatedHeader {
        /// Offset at which the header starts.
        offset: usize,
        /// Bytes remaining before the actual length.
        have: usize,
        /// Header size required by the policy.
        need: usize,
    },

    /// The declared payload length overruns the actual length.
    #[error("truncated payload at offset {offset}: declared {declared}, have {have}")]
    TruncatedPayload {
        /// Offset at which the payload starts.
        offset: usize,
        /// Payload length declared in the header.
        declared: usize,
        /// Bytes remaining before the actual length.
        have: usize,
    },
}

/// Errors produced by typed accessors on a decoded element.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The payload length differs from the accessor's fixed width.
    #[error("payload width mismatch: expected {expected} bytes, element has {actual}")]
    PayloadWidthMismatch {
        /// Width required by the accessor.
        expected: usize,
        /// Declared payload length of the element.
        actual: usize,
    },

    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Crate-level error wrapping every codec stage.
///
/// # Examples
///
/// ```
/// use tlvframe::{FieldWidthPolicy, TlvError};
///
/// let err: TlvError = FieldWidthPolicy::new(3, 1).unwrap_err().into();
/// assert_eq!(err.error_type(), "policy");
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TlvError {
    /// Policy construction failed.
    #[error(transparent)]
    Policy(#[from] InvalidFieldWidth),

    /// Appending an element failed.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Traversing a buffer failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A typed accessor failed.
    #[error("access error: {0}")]
    Access(#[from] AccessError),
}

impl TlvError {
    /// Returns the error category as a string for logging.
    ///
    /// One of `"policy"`, `"encode"`, `"decode"`, or `"access"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Policy(_) => "policy",
            Self::Encode(_) => "encode",
            Self::Decode(_) => "decode",
            Self::Access(_) => "access",
        }
    }

    /// Returns true when the error was caused by malformed input bytes rather
    /// than by a caller supplying an invalid argument.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Decode(DecodeError::TruncatedHeader { .. } | DecodeError::TruncatedPayload { .. })
                | Self::Access(AccessError::InvalidUtf8(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::policy(
        TlvError::from(InvalidFieldWidth { field: WidthField::Length, width: 0 }),
        "invalid length field width: 0"
    )]
    #[case::overflow(
        TlvError::from(EncodeError::BufferOverflow { needed: 5, remaining: 2 }),
        "encode error: buffer overflow: element needs 5 bytes, 2 remaining"
    )]
    #[case::header(
        TlvError::from(DecodeError::TruncatedHeader { offset: 4, have: 1, need: 2 }),
        "decode error: truncated header at offset 4: have 1, need 2"
    )]
    #[case::width(
        TlvError::from(AccessError::PayloadWidthMismatch { expected: 4, actual: 2 }),
        "access error: payload width mismatch: expected 4 bytes, element has 2"
    )]
    fn display_messages(#[case] err: TlvError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    #[case(TlvError::from(DecodeError::TruncatedPayload { offset: 2, declared: 9, have: 1 }), true)]
    #[case(TlvError::from(DecodeError::InvalidLength { length: 9, capacity: 1 }), false)]
    #[case(TlvError::from(EncodeError::TagOutOfRange { tag: 256, width: 1 }), false)]
    fn malformed_input_classification(#[case] err: TlvError, #[case] expected: bool) {
        assert_eq!(err.is_malformed_input(), expected);
    }
}
