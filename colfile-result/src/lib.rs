//! Error types and result definitions for the colfile storage core.
//!
//! Every crate in the workspace returns [`Result<T>`], whose error variant is
//! the single [`Error`] enum defined here. Errors propagate upward with `?`;
//! the core never retries and never downgrades a failure to a warning.
//!
//! # Error Categories
//!
//! - **Unsupported slots** ([`Error::FeatureNotSupported`]): declared access-method
//!   operations outside the implemented core
//! - **File access** ([`Error::FileAccess`]): open/read/write/sync failures and
//!   detected column-file corruption, always with the offending path
//! - **Schema errors** ([`Error::UnsupportedColumnType`]): variable-width attributes
//! - **Data errors** ([`Error::NullValueUnsupported`]): NULL values on insert
//! - **User input errors** ([`Error::InvalidArgumentError`]): bad projections,
//!   wrong row arity, mismatched value types
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
