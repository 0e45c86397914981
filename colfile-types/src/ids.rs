//! Identifiers shared across colfile crates.
//!
//! These live in `colfile-types` so the storage and table layers can share
//! them without depending on each other.

/// Identifier of a table's physical storage, assigned by the host.
pub type TableId = u32;

/// Zero-based position of an attribute within a table's schema.
///
/// Column files are named with the *one-based* ordinal; see
/// `colfile_storage::column_file_path`.
pub type AttributeOrdinal = usize;

/// Page number within a relation, as used by the planner and scan limits.
pub type BlockNumber = u32;

/// Physical address of a tuple as the host understands it.
///
/// Column files have no addressable tuples; this type exists only so the
/// unsupported slots (fetch, delete, update, lock) have a faithful signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TupleId {
    pub block: BlockNumber,
    pub offset: u16,
}

impl TupleId {
    pub fn new(block: BlockNumber, offset: u16) -> Self {
        Self { block, offset }
    }
}

/// Visibility snapshot handed in by the host when a scan begins.
///
/// The columnar core performs no visibility filtering and ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub xmin: u64,
    pub xmax: u64,
}
