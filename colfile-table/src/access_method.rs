//! The table access-method dispatch table.
//!
//! [`TableAccessMethod`] mirrors the host's slot table. Slots outside the
//! columnar core have default bodies that fail with
//! [`Error::FeatureNotSupported`], so an implementation only spells out what
//! it actually supports. [`ColumnarAccessMethod`] is the implementation over
//! per-attribute column files; it is immutable once constructed and can be
//! shared by every caller that registered it.

use std::path::Path;

use colfile_result::{Error, Result};
use colfile_storage::{ColumnFileStore, FsColumnStore};
use colfile_types::{
    BlockNumber, Persistence, RowBuffer, Snapshot, TableHandle, TupleId, Value,
};

use crate::estimate::{self, EstimatorConfig, SizeEstimate};
use crate::insert;
use crate::projection::Projection;
use crate::scan::ScanCursor;
use crate::slots::{AmSlot, SLOTS, UnsupportedOperation};

/// Kind of row buffer an access method fills during scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBufferKind {
    /// Plain arrays of decoded values with no backing physical tuple.
    Virtual,
}

#[inline]
fn unsupported<T>(op: UnsupportedOperation) -> Result<T> {
    tracing::debug!(operation = op.name(), "unsupported access-method slot invoked");
    Err(Error::from(op))
}

/// Host-facing table access-method interface.
pub trait TableAccessMethod {
    /// Per-scan state returned by the `begin_scan*` slots.
    type Cursor;

    /// Whether scans read only the projected attributes.
    const SCANS_LEVERAGE_COLUMN_PROJECTION: bool;

    /// Every slot and whether it is implemented.
    fn slots(&self) -> &'static [AmSlot] {
        SLOTS
    }

    fn slot_callbacks(&self, table: &TableHandle) -> RowBufferKind;

    /// Start a scan over every attribute.
    fn begin_scan(&self, table: &TableHandle, snapshot: Snapshot) -> Result<Self::Cursor> {
        self.begin_scan_with_projection(table, snapshot, None)
    }

    /// Start a scan over the attributes selected by `projection`; `None`
    /// selects every attribute.
    fn begin_scan_with_projection(
        &self,
        table: &TableHandle,
        snapshot: Snapshot,
        projection: Option<&Projection>,
    ) -> Result<Self::Cursor>;

    fn set_scan_limits(
        &self,
        cursor: &mut Self::Cursor,
        start_block: BlockNumber,
        num_blocks: BlockNumber,
    );

    /// Fill `row` with the next row. `Ok(false)` once the scan is exhausted.
    fn scan_next(&self, cursor: &mut Self::Cursor, row: &mut RowBuffer) -> Result<bool>;

    /// Release the scan's resources. Safe to call more than once.
    fn end_scan(&self, cursor: &mut Self::Cursor);

    fn insert_row(&self, table: &TableHandle, values: &[Value]) -> Result<()>;

    /// Planner size estimate. `widths` holds one width hint per attribute
    /// and may be completed in place.
    fn estimate_size(&self, table: &TableHandle, widths: &mut [i32]) -> Result<SizeEstimate>;

    /// Create the physical storage of a new (or newly rewritten) table.
    fn initialize_storage(&self, table: &TableHandle, persistence: Persistence) -> Result<()>;

    // --- Unsupported slots ---

    fn tuple_satisfies_snapshot(
        &self,
        _table: &TableHandle,
        _row: &RowBuffer,
        _snapshot: Snapshot,
    ) -> Result<bool> {
        unsupported(UnsupportedOperation::TupleSatisfiesSnapshot)
    }

    fn begin_index_fetch(&self, _table: &TableHandle) -> Result<()> {
        unsupported(UnsupportedOperation::BeginIndexFetch)
    }

    fn reset_index_fetch(&self, _table: &TableHandle) -> Result<()> {
        unsupported(UnsupportedOperation::ResetIndexFetch)
    }

    fn end_index_fetch(&self, _table: &TableHandle) -> Result<()> {
        unsupported(UnsupportedOperation::EndIndexFetch)
    }

    fn index_fetch_tuple(
        &self,
        _table: &TableHandle,
        _tid: TupleId,
        _snapshot: Snapshot,
        _row: &mut RowBuffer,
    ) -> Result<bool> {
        unsupported(UnsupportedOperation::IndexFetchTuple)
    }

    fn fetch_row_version(
        &self,
        _table: &TableHandle,
        _tid: TupleId,
        _snapshot: Snapshot,
        _row: &mut RowBuffer,
    ) -> Result<bool> {
        unsupported(UnsupportedOperation::FetchRowVersion)
    }

    fn insert_speculative(
        &self,
        _table: &TableHandle,
        _values: &[Value],
        _token: u32,
    ) -> Result<()> {
        unsupported(UnsupportedOperation::InsertSpeculative)
    }

    fn complete_speculative(
        &self,
        _table: &TableHandle,
        _token: u32,
        _succeeded: bool,
    ) -> Result<()> {
        unsupported(UnsupportedOperation::CompleteSpeculative)
    }

    fn delete(&self, _table: &TableHandle, _tid: TupleId, _snapshot: Snapshot) -> Result<()> {
        unsupported(UnsupportedOperation::Delete)
    }

    fn update(
        &self,
        _table: &TableHandle,
        _tid: TupleId,
        _values: &[Value],
        _snapshot: Snapshot,
    ) -> Result<()> {
        unsupported(UnsupportedOperation::Update)
    }

    fn lock_tuple(&self, _table: &TableHandle, _tid: TupleId, _snapshot: Snapshot) -> Result<()> {
        unsupported(UnsupportedOperation::LockTuple)
    }

    fn finish_bulk_insert(&self, _table: &TableHandle) -> Result<()> {
        unsupported(UnsupportedOperation::FinishBulkInsert)
    }

    fn bitmap_page_scan(&self, _cursor: &mut Self::Cursor, _block: BlockNumber) -> Result<bool> {
        unsupported(UnsupportedOperation::BitmapPageScan)
    }

    fn bitmap_page_scan_next(
        &self,
        _cursor: &mut Self::Cursor,
        _row: &mut RowBuffer,
    ) -> Result<bool> {
        unsupported(UnsupportedOperation::BitmapPageScanNext)
    }

    fn sample_next_block(&self, _cursor: &mut Self::Cursor) -> Result<bool> {
        unsupported(UnsupportedOperation::SampleNextBlock)
    }

    fn sample_next_tuple(&self, _cursor: &mut Self::Cursor, _row: &mut RowBuffer) -> Result<bool> {
        unsupported(UnsupportedOperation::SampleNextTuple)
    }

    fn analyze_next_block(&self, _cursor: &mut Self::Cursor, _block: BlockNumber) -> Result<bool> {
        unsupported(UnsupportedOperation::AnalyzeNextBlock)
    }

    fn analyze_next_tuple(&self, _cursor: &mut Self::Cursor, _row: &mut RowBuffer) -> Result<bool> {
        unsupported(UnsupportedOperation::AnalyzeNextTuple)
    }

    fn nontransactional_truncate(&self, _table: &TableHandle) -> Result<()> {
        unsupported(UnsupportedOperation::NontransactionalTruncate)
    }

    fn copy_data(&self, _table: &TableHandle, _new_storage_root: &Path) -> Result<()> {
        unsupported(UnsupportedOperation::CopyData)
    }
}

/// Access method storing each attribute in its own column file.
#[derive(Debug, Clone, Default)]
pub struct ColumnarAccessMethod<S = FsColumnStore> {
    store: S,
    estimator: EstimatorConfig,
}

impl<S: ColumnFileStore> ColumnarAccessMethod<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            estimator: EstimatorConfig::default(),
        }
    }

    pub fn with_estimator_config(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn estimator_config(&self) -> &EstimatorConfig {
        &self.estimator
    }
}

impl<S: ColumnFileStore> TableAccessMethod for ColumnarAccessMethod<S> {
    type Cursor = ScanCursor<S::Reader>;

    const SCANS_LEVERAGE_COLUMN_PROJECTION: bool = true;

    fn slot_callbacks(&self, _table: &TableHandle) -> RowBufferKind {
        RowBufferKind::Virtual
    }

    fn begin_scan_with_projection(
        &self,
        table: &TableHandle,
        snapshot: Snapshot,
        projection: Option<&Projection>,
    ) -> Result<Self::Cursor> {
        let all = Projection::All;
        let mut cursor = ScanCursor::begin(&self.store, table, projection.unwrap_or(&all))?;
        cursor.set_snapshot(snapshot);
        Ok(cursor)
    }

    fn set_scan_limits(
        &self,
        cursor: &mut Self::Cursor,
        start_block: BlockNumber,
        num_blocks: BlockNumber,
    ) {
        cursor.set_scan_limits(start_block, num_blocks);
    }

    fn scan_next(&self, cursor: &mut Self::Cursor, row: &mut RowBuffer) -> Result<bool> {
        cursor.next(row)
    }

    fn end_scan(&self, cursor: &mut Self::Cursor) {
        cursor.close();
    }

    fn insert_row(&self, table: &TableHandle, values: &[Value]) -> Result<()> {
        insert::insert_row(&self.store, table, values)
    }

    fn estimate_size(&self, table: &TableHandle, widths: &mut [i32]) -> Result<SizeEstimate> {
        let current_pages = self.store.allocated_pages(table)?;
        estimate::estimate_size(&self.estimator, table, current_pages, widths)
    }

    fn initialize_storage(&self, table: &TableHandle, persistence: Persistence) -> Result<()> {
        self.store.create_storage(table, persistence)
    }
}
