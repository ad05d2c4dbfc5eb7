//! Field-width policy shared by encoders and decoders.
//!
//! The policy fixes how many bytes every element header spends on its type
//! tag and on its payload length. It is not carried in the buffer, so both
//! sides of an exchange must agree on it out of band.

use crate::error::{InvalidFieldWidth, WidthField};

/// Width of the type tag sub-field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeWidth {
    /// The type tag is omitted from the wire format.
    Absent,
    /// One byte.
    #[default]
    One,
    /// Two bytes.
    Two,
    /// Four bytes.
    Four,
}

impl TypeWidth {
    /// Number of bytes spent on the type tag.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Absent => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<i64> for TypeWidth {
    type Error = InvalidFieldWidth;

    fn try_from(width: i64) -> Result<Self, Self::Error> {
        match width {
            0 => Ok(Self::Absent),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            _ => Err(InvalidFieldWidth {
                field: WidthField::Type,
                width,
            }),
        }
    }
}

/// Width of the payload length sub-field.
///
/// There is no zero width: every element must declare its own size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthWidth {
    /// One byte.
    #[default]
    One,
    /// Two bytes.
    Two,
    /// Four bytes.
    Four,
}

impl LengthWidth {
    /// Number of bytes spent on the payload length.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<i64> for LengthWidth {
    type Error = InvalidFieldWidth;

    fn try_from(width: i64) -> Result<Self, Self::Error> {
        match width {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            _ => Err(InvalidFieldWidth {
                field: WidthField::Length,
                width,
            }),
        }
    }
}

/// Immutable pair of header sub-field widths.
///
/// # Examples
///
/// ```
/// use tlvframe::FieldWidthPolicy;
///
/// let policy = FieldWidthPolicy::new(2, 2).expect("legal widths");
/// assert_eq!(policy.header_len(), 4);
/// assert!(FieldWidthPolicy::new(1, 3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldWidthPolicy {
    type_width: TypeWidth,
    length_width: LengthWidth,
}

impl FieldWidthPolicy {
    /// Validate raw widths and build a policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFieldWidth`] when `type_width` is not one of
    /// `0, 1, 2, 4` or `length_width` is not one of `1, 2, 4`. The type width
    /// is checked first.
    pub fn new(type_width: i64, length_width: i64) -> Result<Self, InvalidFieldWidth> {
        Ok(Self {
            type_width: TypeWidth::try_from(type_width)?,
            length_width: LengthWidth::try_from(length_width)?,
        })
    }

    /// Build a policy from already validated widths.
    #[must_use]
    pub const fn from_widths(type_width: TypeWidth, length_width: LengthWidth) -> Self {
        Self {
            type_width,
            length_width,
        }
    }

    /// Bytes spent on the type tag; zero when tags are omitted.
    #[must_use]
    pub const fn type_width(&self) -> usize { self.type_width.bytes() }

    /// Bytes spent on the payload length.
    #[must_use]
    pub const fn length_width(&self) -> usize { self.length_width.bytes() }

    /// Total header bytes preceding each payload.
    #[must_use]
    pub const fn header_len(&self) -> usize { self.type_width() + self.length_width() }

    /// Largest type tag the type sub-field can carry, or `None` when tags are
    /// omitted from the wire.
    #[must_use]
    pub const fn max_tag(&self) -> Option<u32> { max_for_width(self.type_width.bytes()) }

    /// Largest payload length the length sub-field can declare.
    #[must_use]
    pub fn max_payload_len(&self) -> usize {
        max_for_width(self.length_width.bytes())
            .and_then(|max| usize::try_from(max).ok())
            .unwrap_or(usize::MAX)
    }
}

const fn max_for_width(width: usize) -> Option<u32> {
    match width {
        0 => None,
        1 => Some(0xff),
        2 => Some(0xffff),
        _ => Some(u32::MAX),
    }
}
