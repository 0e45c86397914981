pub use crate::errors::DecodeError;

/// A zero-overhead codec API for a single fixed-width logical type.
///
/// Every codec here writes exactly [`Codec::WIDTH`] bytes; column files have
/// no framing, so a codec that wrote a different amount would desynchronize
/// the file.
pub trait Codec {
    /// Encoded width in bytes.
    const WIDTH: usize;

    type Owned;

    fn encode_into(dst: &mut Vec<u8>, v: &Self::Owned);

    fn decode(src: &[u8]) -> Result<Self::Owned, DecodeError>;
}
