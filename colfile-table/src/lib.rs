//! Table-level operations over per-attribute column files.
//!
//! A table's rows are spread across one file per attribute; row *i* is the
//! *i*-th fixed-width record of every file. This crate provides the pieces a
//! host database drives through its table access-method interface:
//!
//! - [`ScanCursor`]: sequential, projection-aware row scans.
//! - [`insert_row`]: validate-then-append of one row across all column files.
//! - [`estimate_size`]: planner size estimate from on-disk size and catalog
//!   statistics.
//! - [`ColumnarAccessMethod`]: the dispatch table binding the above, with
//!   every slot outside that core mapped to
//!   [`Error::FeatureNotSupported`](colfile_result::Error::FeatureNotSupported).
#![forbid(unsafe_code)]

pub mod constants;

pub mod projection;
pub use projection::Projection;

pub mod scan;
pub use scan::{ScanCursor, ScanState};

pub mod insert;
pub use insert::insert_row;

pub mod estimate;
pub use estimate::{EstimatorConfig, SizeEstimate, estimate_size, resolve_widths};

pub mod slots;
pub use slots::{AmSlot, CoreSlot, SLOTS, UnsupportedOperation};

pub mod access_method;
pub use access_method::{ColumnarAccessMethod, RowBufferKind, TableAccessMethod};
