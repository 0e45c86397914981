//! Minimal fixed-width codecs used by the row codec.
//!
//! - `LeI8`..`LeF64`: the value's bit pattern in little-endian byte order.
//! - `Bool`: one byte, `0` or `1`.
//!
//! By-reference attributes have no codec type; their encoding is the
//! attribute's `width` content bytes copied verbatim (see `codec.rs`).
//!
//! Byte order is little-endian regardless of the host.

#![forbid(unsafe_code)]

pub mod codec;
pub use codec::*;

pub mod le_numeric;
pub use le_numeric::*;

pub mod bool;
pub use bool::*;
