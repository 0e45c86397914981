//! Page-layout constants used by the size estimator defaults.
//!
//! These mirror the host's heap page geometry so that estimates for this
//! access method are comparable with the host's native tables.

/// Host block size in bytes.
pub const BLOCK_SIZE: usize = 8192;

/// Fixed page header preceding the item array.
pub const PAGE_HEADER_SIZE: usize = 24;

/// Per-tuple header, already rounded up to the maximum alignment.
pub const TUPLE_HEADER_SIZE: usize = 24;

/// Line pointer stored in the page's item array for each tuple.
pub const ITEM_POINTER_SIZE: usize = 4;

/// Pages assumed for a table that has never been vacuumed or analyzed.
pub const MIN_UNANALYZED_PAGES: u32 = 10;

/// Width assumed for an attribute with no usable width information.
pub const DEFAULT_VARIABLE_WIDTH: i32 = 32;
