#![doc(html_root_url = "https://docs.rs/tlvframe/latest")]
//! Public API for the `tlvframe` library.
//!
//! This crate encodes and decodes compact binary messages made of
//! Type-Length-Value elements. A [`FieldWidthPolicy`] fixes the byte widths
//! of each element's type and length sub-fields; [`TlvEncoder`] appends
//! elements into a fixed-capacity buffer and [`TlvIterable`] walks an encoded
//! buffer lazily, yielding borrowed [`TlvElement`] views.
//!
//! ```
//! use tlvframe::{FieldWidthPolicy, TlvEncoder};
//!
//! let policy = FieldWidthPolicy::new(2, 2)?;
//! let mut encoder = TlvEncoder::new(policy, 18);
//! encoder.put_int(0, 2)?.put_short(2, 3)?.put_zero_length_element(55)?;
//!
//! let frozen = encoder.freeze();
//! let tags: Vec<u32> = frozen
//!     .iterable()
//!     .to_vec()?
//!     .iter()
//!     .map(|element| element.tag())
//!     .collect();
//! assert_eq!(tags, [0, 2, 55]);
//! # Ok::<(), tlvframe::TlvError>(())
//! ```

pub mod byte_order;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod policy;

pub use decoder::{Elements, TlvElement, TlvIterable};
pub use encoder::{TlvBuffer, TlvEncoder};
pub use error::{AccessError, DecodeError, EncodeError, InvalidFieldWidth, TlvError, WidthField};
pub use policy::{FieldWidthPolicy, LengthWidth, TypeWidth};
