//! Read-only buffer produced by freezing an encoder.

use bytes::Bytes;

use crate::{decoder::TlvIterable, policy::FieldWidthPolicy};

/// Immutable encoded buffer plus its actual length.
///
/// Cloning is cheap and clones share the same storage, so a frozen buffer can
/// be handed to several readers or threads. There is no way back to a
/// writable encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlvBuffer {
    policy: FieldWidthPolicy,
    bytes: Bytes,
    actual_length: usize,
}

impl TlvBuffer {
    pub(super) fn new(policy: FieldWidthPolicy, bytes: Bytes, actual_length: usize) -> Self {
        debug_assert!(actual_length <= bytes.len());
        Self {
            policy,
            bytes,
            actual_length,
        }
    }

    /// Policy the buffer was encoded with.
    #[must_use]
    pub fn policy(&self) -> FieldWidthPolicy { self.policy }

    /// Number of meaningful bytes at the start of the buffer.
    #[must_use]
    pub fn actual_length(&self) -> usize { self.actual_length }

    /// Allocated size of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize { self.bytes.len() }

    /// The valid encoded region.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { self.bytes.get(..self.actual_length).unwrap_or_default() }

    /// The full backing buffer together with the actual length.
    #[must_use]
    pub fn raw_bytes(&self) -> (&[u8], usize) { (&self.bytes[..], self.actual_length) }

    /// Shared handle to the valid encoded region.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes { self.bytes.slice(..self.actual_length) }

    /// Traverse the buffer's elements using the policy it was encoded with.
    #[must_use]
    pub fn iterable(&self) -> TlvIterable<'_> { TlvIterable::over_valid(self.policy, self.as_bytes()) }
}
