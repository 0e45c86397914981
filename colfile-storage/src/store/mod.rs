//! Column file store: one append-only, sequentially read file per attribute.
//!
//! The store hands out per-attribute handles. Writers append exactly one
//! fixed-width record per call; readers return records in file order until
//! [`Record::EndOfFile`]. Neither side knows about rows: keeping all column
//! files of a table at the same record count is the caller's job.

use std::path::Path;

use colfile_result::{Error, Result};
use colfile_types::{AttributeOrdinal, BlockNumber, Persistence, TableHandle};

pub mod fs_store;
pub use fs_store::*;

pub mod instrumented_store;
pub use instrumented_store::*;

/// Outcome of one sequential read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// One complete record of the attribute's declared width.
    Data(&'a [u8]),
    /// No bytes remain in the file.
    EndOfFile,
}

impl Record<'_> {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, Record::EndOfFile)
    }
}

/// Sequential read handle over one column file.
pub trait ColumnReader {
    fn path(&self) -> &Path;

    fn ordinal(&self) -> AttributeOrdinal;

    /// Read the next fixed-width record.
    ///
    /// Returns [`Record::EndOfFile`] exactly when no bytes remain. A trailing
    /// partial record is reported as [`Error::FileAccess`].
    fn read_next_record(&mut self) -> Result<Record<'_>>;

    /// Release the underlying file. Idempotent.
    fn close(&mut self);
}

/// Append handle over one column file.
pub trait ColumnWriter {
    fn path(&self) -> &Path;

    fn ordinal(&self) -> AttributeOrdinal;

    /// Append one record and push it to storage before returning.
    ///
    /// `bytes` must be exactly the attribute's declared width.
    fn append_record(&mut self, bytes: &[u8]) -> Result<()>;

    /// Release the underlying file. Idempotent.
    fn close(&mut self);
}

/// Per-table storage of column files.
pub trait ColumnFileStore {
    type Reader: ColumnReader;
    type Writer: ColumnWriter;

    /// Open the column file of `ordinal` for appending.
    fn open_for_append(&self, table: &TableHandle, ordinal: AttributeOrdinal)
    -> Result<Self::Writer>;

    /// Open the column file of `ordinal` for sequential reading.
    fn open_for_read(&self, table: &TableHandle, ordinal: AttributeOrdinal)
    -> Result<Self::Reader>;

    /// Pages currently allocated to the table's column files.
    fn allocated_pages(&self, table: &TableHandle) -> Result<BlockNumber>;

    /// Create the table's physical storage: an empty main fork, one empty
    /// column file per attribute, and for unlogged tables a synced init fork.
    fn create_storage(&self, table: &TableHandle, persistence: Persistence) -> Result<()>;
}

/// Declared width of `ordinal`, validating the ordinal and fixed-width-ness.
pub fn record_width(table: &TableHandle, ordinal: AttributeOrdinal) -> Result<usize> {
    let attr = table.attribute(ordinal).ok_or_else(|| {
        Error::invalid_argument(format!(
            "attribute ordinal {ordinal} out of range for table {} with {} attributes",
            table.id(),
            table.attribute_count()
        ))
    })?;
    attr.fixed_width().ok_or(Error::UnsupportedColumnType {
        attribute: ordinal,
        width: attr.width,
    })
}
