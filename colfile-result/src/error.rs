use std::path::{Path, PathBuf};
use std::{fmt, io};
use thiserror::Error;

/// Unified error type for all colfile operations.
///
/// Every failure in the storage core maps onto one of these variants and
/// propagates to the caller unchanged. Nothing here is retried internally:
/// the core has no notion of a transient failure.
///
/// # Categories
///
/// - [`Error::FeatureNotSupported`]: an access-method slot the core declares
///   but does not implement.
/// - [`Error::FileAccess`]: open/read/write/flush failures, including a
///   detected violation of the column-file synchronization invariant.
/// - [`Error::UnsupportedColumnType`]: a variable-width or zero-width
///   attribute reached the fixed-width codec.
/// - [`Error::NullValueUnsupported`]: a NULL reached the insert path.
#[derive(Error, Debug)]
pub enum Error {
    /// The host invoked an access-method slot that is part of the dispatch
    /// table but outside the implemented core.
    ///
    /// Always fatal to the calling request.
    #[error("feature not supported: {operation} is not implemented by the columnar access method")]
    FeatureNotSupported { operation: &'static str },

    /// A column file (or another storage file) could not be opened, read,
    /// written or synced.
    ///
    /// The offending path is always included. `source` carries the system
    /// error; for detected corruption (a short trailing record, or column
    /// files that run out of records at different positions) it is an
    /// [`io::ErrorKind::InvalidData`] error describing the condition.
    #[error("could not access file \"{}\": {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The attribute has a negative (variable) declared width.
    ///
    /// Only attributes with a positive fixed width can be stored in column
    /// files.
    #[error("attribute {attribute} has width {width}; only positive fixed-width columns are supported")]
    UnsupportedColumnType { attribute: usize, width: i16 },

    /// A NULL value was supplied for an attribute.
    ///
    /// Column files carry no null bitmap, so NULLs cannot be represented.
    #[error("attribute {attribute} is NULL; NULL values are not supported")]
    NullValueUnsupported { attribute: usize },

    /// Invalid API argument: projection ordinal out of range, wrong row
    /// arity, or a value whose type does not match its attribute.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an I/O error together with the path it occurred on.
    ///
    /// # Examples
    ///
    /// ```
    /// use colfile_result::Error;
    ///
    /// let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    /// let err = Error::file_access("/tmp/t.1", io_err);
    /// assert!(err.to_string().contains("/tmp/t.1"));
    /// ```
    #[inline]
    pub fn file_access(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Report on-disk corruption for `path` as a [`Error::FileAccess`].
    #[inline]
    pub fn corrupt_file<M: fmt::Display>(path: impl AsRef<Path>, msg: M) -> Self {
        Error::file_access(path, io::Error::new(io::ErrorKind::InvalidData, msg.to_string()))
    }

    /// Reject a declared-but-unimplemented access-method slot.
    #[inline]
    pub fn feature_not_supported(operation: &'static str) -> Self {
        Error::FeatureNotSupported { operation }
    }

    /// Create an invalid-argument error from any displayable value.
    #[inline]
    pub fn invalid_argument<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }

    /// Path associated with the error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::FileAccess { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}
