/// Error type for the low-level fixed-width decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input slice does not contain enough bytes to decode a value.
    NotEnoughData,
}
