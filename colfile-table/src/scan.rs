//! Sequential scans over a table's column files.
//!
//! A cursor holds one read handle per projected attribute and advances all
//! of them in lockstep. Because every insert appends exactly one record to
//! every column file, the handles reach end-of-file together; a cursor that
//! sees some handles end while others still return data reports the table as
//! corrupt instead of producing a misaligned row.

use std::fmt;

use colfile_result::{Error, Result};
use colfile_storage::{ColumnFileStore, ColumnReader, Record};
use colfile_types::{
    AttributeDesc, AttributeOrdinal, BlockNumber, RowBuffer, Snapshot, TableHandle, TableId,
    Value, codec,
};

use crate::projection::Projection;

/// Lifecycle of a [`ScanCursor`].
///
/// ```text
/// Unopened --open--> Open --next(row)--> Positioned --next(eof)--> Exhausted
///                      \________________________\_____________________\--close--> Closed
///                      \--next(error)--> Failed --close--> Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Unopened,
    Open,
    Positioned,
    Exhausted,
    /// A read or decode failed mid-row. The handles are released and every
    /// further `next` is an error.
    Failed,
    Closed,
}

/// Per-scan state: the resolved projection and its open column readers.
pub struct ScanCursor<R: ColumnReader> {
    table_id: TableId,
    attributes: Vec<AttributeDesc>,
    /// Ascending, deduplicated.
    projection: Vec<AttributeOrdinal>,
    /// `readers[i]` reads `projection[i]`.
    readers: Vec<R>,
    /// Decoded values for the row being assembled, reused across calls.
    pending: Vec<Value>,
    snapshot: Option<Snapshot>,
    state: ScanState,
    rows_returned: u64,
}

impl<R: ColumnReader> fmt::Debug for ScanCursor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanCursor")
            .field("table_id", &self.table_id)
            .field("projection", &self.projection)
            .field("open_readers", &self.readers.len())
            .field("state", &self.state)
            .field("rows_returned", &self.rows_returned)
            .finish()
    }
}

impl<R: ColumnReader> ScanCursor<R> {
    /// Create an unopened cursor for `table`.
    ///
    /// The projection is resolved and validated here so that a bad ordinal
    /// is reported before any file is touched.
    pub fn new(table: &TableHandle, projection: &Projection) -> Result<Self> {
        let projection = projection.resolve(table.attribute_count())?;
        Ok(Self {
            table_id: table.id(),
            attributes: table.attributes().to_vec(),
            pending: Vec::with_capacity(projection.len()),
            projection,
            readers: Vec::new(),
            snapshot: None,
            state: ScanState::Unopened,
            rows_returned: 0,
        })
    }

    /// Create a cursor and open it against `store` in one step.
    pub fn begin<S>(store: &S, table: &TableHandle, projection: &Projection) -> Result<Self>
    where
        S: ColumnFileStore<Reader = R>,
    {
        let mut cursor = Self::new(table, projection)?;
        cursor.open(store, table)?;
        Ok(cursor)
    }

    /// Open one read handle per projected attribute.
    ///
    /// If any open fails, the handles opened so far are closed before the
    /// error is returned and the cursor is left `Closed`.
    pub fn open<S>(&mut self, store: &S, table: &TableHandle) -> Result<()>
    where
        S: ColumnFileStore<Reader = R>,
    {
        if self.state != ScanState::Unopened {
            return Err(Error::Internal(format!(
                "scan over table {} opened twice (state {:?})",
                self.table_id, self.state
            )));
        }
        if table.id() != self.table_id || table.attribute_count() != self.attributes.len() {
            return Err(Error::invalid_argument(format!(
                "cursor was created for table {} with {} attributes, opened against table {} with {}",
                self.table_id,
                self.attributes.len(),
                table.id(),
                table.attribute_count()
            )));
        }

        self.readers.reserve(self.projection.len());
        for idx in 0..self.projection.len() {
            let ordinal = self.projection[idx];
            match store.open_for_read(table, ordinal) {
                Ok(reader) => self.readers.push(reader),
                Err(err) => {
                    tracing::debug!(
                        table_id = self.table_id,
                        ordinal,
                        opened = self.readers.len(),
                        error = %err,
                        "scan open failed, releasing opened column files"
                    );
                    self.release();
                    return Err(err);
                }
            }
        }

        self.state = ScanState::Open;
        tracing::debug!(
            table_id = self.table_id,
            projection = ?self.projection,
            "opened scan"
        );
        Ok(())
    }

    /// Produce the next row into `row`.
    ///
    /// Returns `Ok(true)` with the projected slots of `row` filled, or
    /// `Ok(false)` with `row` cleared once the table is exhausted. Slots of
    /// attributes outside the projection are not written.
    ///
    /// # Errors
    ///
    /// - [`Error::FileAccess`] if a read fails, or if the projected column
    ///   files do not all end on the same row.
    /// - [`Error::InvalidArgumentError`] if `row` does not have one slot per
    ///   table attribute.
    /// - [`Error::Internal`] if the cursor is not open, or an earlier call
    ///   failed.
    ///
    /// A read or decode failure leaves the cursor [`ScanState::Failed`].
    pub fn next(&mut self, row: &mut RowBuffer) -> Result<bool> {
        match self.state {
            ScanState::Open | ScanState::Positioned => {}
            ScanState::Exhausted => {
                row.clear();
                return Ok(false);
            }
            ScanState::Failed => {
                return Err(Error::Internal(format!(
                    "scan over table {} failed at row {} and cannot continue",
                    self.table_id, self.rows_returned
                )));
            }
            ScanState::Unopened | ScanState::Closed => {
                return Err(Error::Internal(format!(
                    "next() on {:?} scan over table {}",
                    self.state, self.table_id
                )));
            }
        }
        if row.len() != self.attributes.len() {
            return Err(Error::invalid_argument(format!(
                "row buffer has {} slots but table {} has {} attributes",
                row.len(),
                self.table_id,
                self.attributes.len()
            )));
        }

        match self.advance(row) {
            Ok(produced) => Ok(produced),
            Err(err) => {
                // Earlier readers may already have consumed this row's record.
                tracing::debug!(
                    table_id = self.table_id,
                    row = self.rows_returned,
                    error = %err,
                    "scan failed, releasing column files"
                );
                self.release_handles();
                self.state = ScanState::Failed;
                Err(err)
            }
        }
    }

    fn advance(&mut self, row: &mut RowBuffer) -> Result<bool> {
        self.pending.clear();
        let mut first_eof: Option<usize> = None;
        for (idx, reader) in self.readers.iter_mut().enumerate() {
            let ordinal = self.projection[idx];
            match reader.read_next_record()? {
                Record::Data(bytes) => {
                    let value = codec::decode(ordinal, &self.attributes[ordinal], bytes)?;
                    self.pending.push(value);
                }
                Record::EndOfFile => {
                    first_eof.get_or_insert(idx);
                }
            }
        }

        if self.pending.is_empty() {
            self.state = ScanState::Exhausted;
            row.clear();
            tracing::debug!(
                table_id = self.table_id,
                rows = self.rows_returned,
                "scan exhausted"
            );
            return Ok(false);
        }

        if let Some(idx) = first_eof {
            let path = self.readers[idx].path().to_path_buf();
            tracing::warn!(
                table_id = self.table_id,
                ordinal = self.projection[idx],
                row = self.rows_returned,
                "column files out of sync"
            );
            return Err(Error::corrupt_file(
                path,
                format!(
                    "column file ended at row {} while {} of {} projected column files still have records",
                    self.rows_returned,
                    self.pending.len(),
                    self.readers.len()
                ),
            ));
        }

        for (&ordinal, value) in self.projection.iter().zip(self.pending.drain(..)) {
            row.set(ordinal, value);
        }
        row.mark_filled();
        self.state = ScanState::Positioned;
        self.rows_returned += 1;
        Ok(true)
    }

    /// Accepted for interface compatibility; column files have no block
    /// structure to restrict, so the whole table is still scanned.
    pub fn set_scan_limits(&mut self, start_block: BlockNumber, num_blocks: BlockNumber) {
        tracing::trace!(
            table_id = self.table_id,
            start_block,
            num_blocks,
            "ignoring scan limits"
        );
    }

    /// Release every open handle. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.state == ScanState::Closed {
            return;
        }
        self.release();
        tracing::debug!(
            table_id = self.table_id,
            rows = self.rows_returned,
            "closed scan"
        );
    }

    fn release(&mut self) {
        self.release_handles();
        self.state = ScanState::Closed;
    }

    fn release_handles(&mut self) {
        for reader in &mut self.readers {
            reader.close();
        }
        self.readers.clear();
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Resolved projection: ascending attribute ordinals.
    pub fn projection(&self) -> &[AttributeOrdinal] {
        &self.projection
    }

    /// Snapshot the scan was started with. Recorded only; rows are never
    /// filtered by it.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn rows_returned(&self) -> u64 {
        self.rows_returned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::insert_row;
    use colfile_storage::FsColumnStore;
    use colfile_test_utils::TempTable;
    use colfile_types::Persistence;

    fn filled_table(rows: &[(i32, i32)]) -> (TempTable, FsColumnStore) {
        let t = TempTable::two_int32();
        let store = FsColumnStore::default();
        store
            .create_storage(t.handle(), Persistence::Permanent)
            .unwrap();
        for &(a, b) in rows {
            insert_row(&store, t.handle(), &[Value::from(a), Value::from(b)]).unwrap();
        }
        (t, store)
    }

    #[test]
    fn walks_through_states() {
        let (t, store) = filled_table(&[(1, 10)]);
        let mut cursor = ScanCursor::new(t.handle(), &Projection::All).unwrap();
        assert_eq!(cursor.state(), ScanState::Unopened);

        cursor.open(&store, t.handle()).unwrap();
        assert_eq!(cursor.state(), ScanState::Open);

        let mut row = RowBuffer::new(2);
        assert!(cursor.next(&mut row).unwrap());
        assert_eq!(cursor.state(), ScanState::Positioned);
        assert!(!cursor.next(&mut row).unwrap());
        assert_eq!(cursor.state(), ScanState::Exhausted);
        assert!(row.is_empty());

        // Exhaustion is sticky.
        assert!(!cursor.next(&mut row).unwrap());

        cursor.close();
        assert_eq!(cursor.state(), ScanState::Closed);
        cursor.close();
        assert_eq!(cursor.state(), ScanState::Closed);
    }

    #[test]
    fn next_before_open_is_an_error() {
        let (t, _store) = filled_table(&[]);
        let mut cursor =
            ScanCursor::<<FsColumnStore as ColumnFileStore>::Reader>::new(t.handle(), &Projection::All)
                .unwrap();
        let mut row = RowBuffer::new(2);
        assert!(matches!(cursor.next(&mut row), Err(Error::Internal(_))));
    }

    #[test]
    fn opening_twice_is_an_error() {
        let (t, store) = filled_table(&[]);
        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        assert!(matches!(
            cursor.open(&store, t.handle()),
            Err(Error::Internal(_))
        ));
    }

    #[test]
    fn empty_table_is_immediately_exhausted() {
        let (t, store) = filled_table(&[]);
        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        let mut row = RowBuffer::new(2);
        assert!(!cursor.next(&mut row).unwrap());
        assert_eq!(cursor.rows_returned(), 0);
    }

    #[test]
    fn projection_leaves_other_slots_untouched() {
        let (t, store) = filled_table(&[(1, 10), (2, 20)]);
        let mut cursor =
            ScanCursor::begin(&store, t.handle(), &Projection::ordinals([1])).unwrap();
        let mut row = RowBuffer::new(2);
        row.set(0, Value::Int32(-1));

        assert!(cursor.next(&mut row).unwrap());
        assert_eq!(row.value(0), Some(&Value::Int32(-1)));
        assert_eq!(row.value(1), Some(&Value::Int32(10)));
        assert_eq!(row.valid_count(), 2);
        assert!(!row.is_empty());
    }

    #[test]
    fn wrong_row_arity_is_rejected() {
        let (t, store) = filled_table(&[(1, 10)]);
        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        let mut row = RowBuffer::new(3);
        assert!(matches!(
            cursor.next(&mut row),
            Err(Error::InvalidArgumentError(_))
        ));
    }

    #[test]
    fn scan_limits_do_not_restrict_rows() {
        let (t, store) = filled_table(&[(1, 10), (2, 20), (3, 30)]);
        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        cursor.set_scan_limits(1, 1);
        let mut row = RowBuffer::new(2);
        let mut n = 0;
        while cursor.next(&mut row).unwrap() {
            n += 1;
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn read_failure_is_terminal() {
        let (t, store) = filled_table(&[(1, 10), (2, 20), (3, 30)]);
        let path = colfile_storage::column_file_path(t.handle().storage_root(), 1);
        let len = std::fs::metadata(&path).unwrap().len();
        std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(len - 1)
            .unwrap();

        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        let mut row = RowBuffer::new(2);
        assert!(cursor.next(&mut row).unwrap());
        assert!(cursor.next(&mut row).unwrap());
        assert!(matches!(cursor.next(&mut row), Err(Error::FileAccess { .. })));
        assert_eq!(cursor.state(), ScanState::Failed);

        for _ in 0..2 {
            assert!(matches!(cursor.next(&mut row), Err(Error::Internal(_))));
            assert_eq!(cursor.state(), ScanState::Failed);
        }
        assert_eq!(cursor.rows_returned(), 2);

        cursor.close();
        assert_eq!(cursor.state(), ScanState::Closed);
    }

    #[test]
    fn table_without_attributes_has_no_rows() {
        let t = TempTable::new(Vec::new());
        let store = FsColumnStore::default();
        store
            .create_storage(t.handle(), Persistence::Permanent)
            .unwrap();
        let mut cursor = ScanCursor::begin(&store, t.handle(), &Projection::All).unwrap();
        let mut row = RowBuffer::new(0);
        assert!(!cursor.next(&mut row).unwrap());
    }
}
