use super::*;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// I/O counters for a single attribute's column file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeIo {
    pub read_opens: u64,
    /// Calls to `read_next_record`, including the one that hits end-of-file.
    pub read_calls: u64,
    pub records_read: u64,
    pub append_opens: u64,
    pub records_appended: u64,
}

impl AttributeIo {
    /// Whether the column file was touched in any way.
    pub fn is_untouched(&self) -> bool {
        *self == AttributeIo::default()
    }

    fn delta_since(&self, older: &Self) -> Self {
        Self {
            read_opens: self.read_opens.saturating_sub(older.read_opens),
            read_calls: self.read_calls.saturating_sub(older.read_calls),
            records_read: self.records_read.saturating_sub(older.records_read),
            append_opens: self.append_opens.saturating_sub(older.append_opens),
            records_appended: self.records_appended.saturating_sub(older.records_appended),
        }
    }
}

/// A thread-safe container for column-file I/O statistics.
#[derive(Debug, Default)]
pub struct IoStats {
    // --- Totals across all attributes ---
    pub read_opens: AtomicU64,
    pub append_opens: AtomicU64,
    pub read_calls: AtomicU64,
    pub records_read: AtomicU64,
    pub records_appended: AtomicU64,
    pub bytes_read: AtomicU64,
    pub bytes_appended: AtomicU64,

    // --- Per-attribute breakdown ---
    per_attribute: Mutex<FxHashMap<AttributeOrdinal, AttributeIo>>,
}

impl IoStats {
    fn attributes(&self) -> MutexGuard<'_, FxHashMap<AttributeOrdinal, AttributeIo>> {
        // Counters stay meaningful even if a panicking thread held the lock.
        self.per_attribute
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, ordinal: AttributeOrdinal, f: impl FnOnce(&mut AttributeIo)) {
        f(self.attributes().entry(ordinal).or_default());
    }

    fn record_read_open(&self, ordinal: AttributeOrdinal) {
        self.read_opens.fetch_add(1, Ordering::Relaxed);
        self.update(ordinal, |a| a.read_opens += 1);
    }

    fn record_append_open(&self, ordinal: AttributeOrdinal) {
        self.append_opens.fetch_add(1, Ordering::Relaxed);
        self.update(ordinal, |a| a.append_opens += 1);
    }

    fn record_read(&self, ordinal: AttributeOrdinal, bytes: Option<usize>) {
        self.read_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(n) = bytes {
            self.records_read.fetch_add(1, Ordering::Relaxed);
            self.bytes_read.fetch_add(n as u64, Ordering::Relaxed);
        }
        self.update(ordinal, |a| {
            a.read_calls += 1;
            if bytes.is_some() {
                a.records_read += 1;
            }
        });
    }

    fn record_append(&self, ordinal: AttributeOrdinal, bytes: usize) {
        self.records_appended.fetch_add(1, Ordering::Relaxed);
        self.bytes_appended.fetch_add(bytes as u64, Ordering::Relaxed);
        self.update(ordinal, |a| a.records_appended += 1);
    }

    /// Counters for one attribute (all zero if it was never touched).
    pub fn attribute(&self, ordinal: AttributeOrdinal) -> AttributeIo {
        self.attributes().get(&ordinal).copied().unwrap_or_default()
    }

    /// Capture a point-in-time snapshot of the accumulated metrics.
    pub fn snapshot(&self) -> IoStatsSnapshot {
        IoStatsSnapshot {
            read_opens: self.read_opens.load(Ordering::Relaxed),
            append_opens: self.append_opens.load(Ordering::Relaxed),
            read_calls: self.read_calls.load(Ordering::Relaxed),
            records_read: self.records_read.load(Ordering::Relaxed),
            records_appended: self.records_appended.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_appended: self.bytes_appended.load(Ordering::Relaxed),
            per_attribute: self.attributes().clone(),
        }
    }

    /// Reset all statistics to zero.
    pub fn reset(&self) {
        self.read_opens.store(0, Ordering::Relaxed);
        self.append_opens.store(0, Ordering::Relaxed);
        self.read_calls.store(0, Ordering::Relaxed);
        self.records_read.store(0, Ordering::Relaxed);
        self.records_appended.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.bytes_appended.store(0, Ordering::Relaxed);
        self.attributes().clear();
    }
}

/// Immutable copy of [`IoStats`] counters captured at a specific moment.
#[derive(Debug, Clone, Default)]
pub struct IoStatsSnapshot {
    pub read_opens: u64,
    pub append_opens: u64,
    pub read_calls: u64,
    pub records_read: u64,
    pub records_appended: u64,
    pub bytes_read: u64,
    pub bytes_appended: u64,
    pub per_attribute: FxHashMap<AttributeOrdinal, AttributeIo>,
}

impl IoStatsSnapshot {
    /// Compute the delta between two snapshots (`newer - older`). Saturates at zero.
    pub fn delta_since(&self, older: &Self) -> Self {
        macro_rules! delta {
            ($field:ident) => {
                self.$field.saturating_sub(older.$field)
            };
        }

        let per_attribute = self
            .per_attribute
            .iter()
            .map(|(ordinal, io)| {
                let base = older.per_attribute.get(ordinal).copied().unwrap_or_default();
                (*ordinal, io.delta_since(&base))
            })
            .collect();

        Self {
            read_opens: delta!(read_opens),
            append_opens: delta!(append_opens),
            read_calls: delta!(read_calls),
            records_read: delta!(records_read),
            records_appended: delta!(records_appended),
            bytes_read: delta!(bytes_read),
            bytes_appended: delta!(bytes_appended),
            per_attribute,
        }
    }

    pub fn attribute(&self, ordinal: AttributeOrdinal) -> AttributeIo {
        self.per_attribute.get(&ordinal).copied().unwrap_or_default()
    }

    /// Ordinals whose column files were opened or read, ascending.
    pub fn touched_attributes(&self) -> Vec<AttributeOrdinal> {
        let mut out: Vec<_> = self
            .per_attribute
            .iter()
            .filter(|(_, io)| !io.is_untouched())
            .map(|(ordinal, _)| *ordinal)
            .collect();
        out.sort_unstable();
        out
    }
}

/// A wrapper around any [`ColumnFileStore`] that counts column-file I/O.
#[derive(Debug)]
pub struct InstrumentedStore<S: ColumnFileStore> {
    inner: S,
    stats: Arc<IoStats>,
}

impl<S> InstrumentedStore<S>
where
    S: ColumnFileStore,
{
    /// Wraps a store and returns the instrumented version along with a handle
    /// to its statistics.
    pub fn new(inner: S) -> (Self, Arc<IoStats>) {
        let stats = Arc::new(IoStats::default());
        (
            Self {
                inner,
                stats: Arc::clone(&stats),
            },
            stats,
        )
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> ColumnFileStore for InstrumentedStore<S>
where
    S: ColumnFileStore,
{
    type Reader = InstrumentedReader<S::Reader>;
    type Writer = InstrumentedWriter<S::Writer>;

    fn open_for_append(
        &self,
        table: &TableHandle,
        ordinal: AttributeOrdinal,
    ) -> Result<Self::Writer> {
        self.stats.record_append_open(ordinal);
        let inner = self.inner.open_for_append(table, ordinal)?;
        Ok(InstrumentedWriter {
            inner,
            stats: Arc::clone(&self.stats),
        })
    }

    fn open_for_read(
        &self,
        table: &TableHandle,
        ordinal: AttributeOrdinal,
    ) -> Result<Self::Reader> {
        self.stats.record_read_open(ordinal);
        let inner = self.inner.open_for_read(table, ordinal)?;
        Ok(InstrumentedReader {
            inner,
            stats: Arc::clone(&self.stats),
        })
    }

    fn allocated_pages(&self, table: &TableHandle) -> Result<BlockNumber> {
        self.inner.allocated_pages(table)
    }

    fn create_storage(&self, table: &TableHandle, persistence: Persistence) -> Result<()> {
        self.inner.create_storage(table, persistence)
    }
}

/// Reader handed out by [`InstrumentedStore`].
#[derive(Debug)]
pub struct InstrumentedReader<R> {
    inner: R,
    stats: Arc<IoStats>,
}

impl<R: ColumnReader> ColumnReader for InstrumentedReader<R> {
    fn path(&self) -> &Path {
        self.inner.path()
    }

    fn ordinal(&self) -> AttributeOrdinal {
        self.inner.ordinal()
    }

    fn read_next_record(&mut self) -> Result<Record<'_>> {
        let ordinal = self.inner.ordinal();
        let record = self.inner.read_next_record()?;
        let bytes = match record {
            Record::Data(b) => Some(b.len()),
            Record::EndOfFile => None,
        };
        self.stats.record_read(ordinal, bytes);
        Ok(record)
    }

    fn close(&mut self) {
        self.inner.close()
    }
}

/// Writer handed out by [`InstrumentedStore`].
#[derive(Debug)]
pub struct InstrumentedWriter<W> {
    inner: W,
    stats: Arc<IoStats>,
}

impl<W: ColumnWriter> ColumnWriter for InstrumentedWriter<W> {
    fn path(&self) -> &Path {
        self.inner.path()
    }

    fn ordinal(&self) -> AttributeOrdinal {
        self.inner.ordinal()
    }

    fn append_record(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.append_record(bytes)?;
        self.stats.record_append(self.inner.ordinal(), bytes.len());
        Ok(())
    }

    fn close(&mut self) {
        self.inner.close()
    }
}
