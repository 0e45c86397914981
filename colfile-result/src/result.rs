use crate::error::Error;

/// Result type alias used throughout colfile.
///
/// Shorthand for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
