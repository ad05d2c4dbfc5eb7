//! Helpers for explicit network byte-order conversions.
//!
//! Every multi-byte header sub-field and fixed-width payload in a TLV buffer
//! is big-endian. These helpers keep Clippy expectations scoped to the
//! conversion points so codec code stays explicit about wire endianness.

/// Serialise an `i16` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use tlvframe::byte_order::write_network_i16;
///
/// assert_eq!(write_network_i16(0x1234), [0x12, 0x34]);
/// ```
#[must_use]
pub fn write_network_i16(value: i16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `i16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use tlvframe::byte_order::read_network_i16;
///
/// assert_eq!(read_network_i16([0xff, 0xfe]), -2);
/// ```
#[must_use]
pub fn read_network_i16(bytes: [u8; 2]) -> i16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i16::from_be_bytes(bytes)
}

/// Serialise an `i32` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use tlvframe::byte_order::write_network_i32;
///
/// assert_eq!(write_network_i32(0x1234_5678), [0x12, 0x34, 0x56, 0x78]);
/// ```
#[must_use]
pub fn write_network_i32(value: i32) -> [u8; 4] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `i32` from its on-wire representation.
#[must_use]
pub fn read_network_i32(bytes: [u8; 4]) -> i32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i32::from_be_bytes(bytes)
}

/// Write the low `out.len()` bytes of `value` into `out`, most significant
/// byte first.
///
/// `out` must be at most four bytes wide and `value` must fit in it; header
/// writers check both before calling.
///
/// # Examples
///
/// ```
/// use tlvframe::byte_order::write_network_uint;
///
/// let mut out = [0u8; 2];
/// write_network_uint(0x0102, &mut out);
/// assert_eq!(out, [0x01, 0x02]);
/// ```
pub fn write_network_uint(value: u32, out: &mut [u8]) {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    let wide = value.to_be_bytes();
    let skip = wide.len().saturating_sub(out.len());
    if let Some(tail) = wide.get(skip..) {
        out.copy_from_slice(tail);
    }
}

/// Read an unsigned integer of up to four bytes stored most significant
/// byte first. An empty slice reads as zero.
///
/// # Examples
///
/// ```
/// use tlvframe::byte_order::read_network_uint;
///
/// assert_eq!(read_network_uint(&[]), 0);
/// assert_eq!(read_network_uint(&[0x01, 0x02]), 0x0102);
/// ```
#[must_use]
pub fn read_network_uint(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}
