use super::*;
use crate::options::{StorageOptions, SyncPolicy};
use crate::paths::{column_file_path, init_fork_path};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::PathBuf;

/// Column file store backed by plain files next to the table's storage root.
#[derive(Debug, Clone, Default)]
pub struct FsColumnStore {
    options: StorageOptions,
}

impl FsColumnStore {
    pub fn new(options: StorageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }
}

fn create_empty(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::file_access(path, e))
}

impl ColumnFileStore for FsColumnStore {
    type Reader = FsColumnReader;
    type Writer = FsColumnWriter;

    fn open_for_append(
        &self,
        table: &TableHandle,
        ordinal: AttributeOrdinal,
    ) -> Result<Self::Writer> {
        let width = record_width(table, ordinal)?;
        let path = column_file_path(table.storage_root(), ordinal);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| Error::file_access(&path, e))?;
        tracing::trace!(path = %path.display(), ordinal, width, "opened column file for append");
        Ok(FsColumnWriter {
            path,
            ordinal,
            width,
            sync_policy: self.options.sync_policy,
            file: Some(file),
        })
    }

    fn open_for_read(
        &self,
        table: &TableHandle,
        ordinal: AttributeOrdinal,
    ) -> Result<Self::Reader> {
        let width = record_width(table, ordinal)?;
        let path = column_file_path(table.storage_root(), ordinal);
        let file = File::open(&path).map_err(|e| Error::file_access(&path, e))?;
        tracing::trace!(path = %path.display(), ordinal, width, "opened column file for read");
        Ok(FsColumnReader {
            path,
            ordinal,
            file: Some(BufReader::new(file)),
            buf: vec![0u8; width],
        })
    }

    fn allocated_pages(&self, table: &TableHandle) -> Result<BlockNumber> {
        let root = table.storage_root();
        let mut total: u64 = 0;
        for ordinal in 0..table.attribute_count() {
            let path = column_file_path(root, ordinal);
            match fs::metadata(&path) {
                Ok(meta) => total = total.saturating_add(meta.len()),
                // Never written and never initialized: nothing allocated.
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Error::file_access(&path, e)),
            }
        }
        let page_size = self.options.page_size.max(1) as u64;
        let pages = total.div_ceil(page_size);
        Ok(BlockNumber::try_from(pages).unwrap_or(BlockNumber::MAX))
    }

    fn create_storage(&self, table: &TableHandle, persistence: Persistence) -> Result<()> {
        let root = table.storage_root();
        create_empty(root)?;
        for ordinal in 0..table.attribute_count() {
            create_empty(&column_file_path(root, ordinal))?;
        }

        if persistence == Persistence::Unlogged {
            // The host resets the table from this fork after a crash, so it
            // must be on disk before we return.
            let init = init_fork_path(root);
            let file = create_empty(&init)?;
            file.sync_all().map_err(|e| Error::file_access(&init, e))?;
            tracing::debug!(path = %init.display(), "created and synced init fork");
        }

        tracing::debug!(
            table_id = table.id(),
            root = %root.display(),
            columns = table.attribute_count(),
            ?persistence,
            "created table storage"
        );
        Ok(())
    }
}

/// Sequential reader over one column file.
#[derive(Debug)]
pub struct FsColumnReader {
    path: PathBuf,
    ordinal: AttributeOrdinal,
    file: Option<BufReader<File>>,
    /// One record; its length is the attribute width.
    buf: Vec<u8>,
}

impl ColumnReader for FsColumnReader {
    fn path(&self) -> &Path {
        &self.path
    }

    fn ordinal(&self) -> AttributeOrdinal {
        self.ordinal
    }

    fn read_next_record(&mut self) -> Result<Record<'_>> {
        let Some(file) = self.file.as_mut() else {
            return Err(Error::Internal(format!(
                "read from closed column file \"{}\"",
                self.path.display()
            )));
        };

        let width = self.buf.len();
        let mut filled = 0;
        while filled < width {
            match file.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::file_access(&self.path, e)),
            }
        }

        if filled == 0 {
            Ok(Record::EndOfFile)
        } else if filled == width {
            Ok(Record::Data(&self.buf))
        } else {
            Err(Error::corrupt_file(
                &self.path,
                format!("trailing partial record: {filled} of {width} bytes"),
            ))
        }
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            tracing::trace!(path = %self.path.display(), "closed column reader");
        }
    }
}

/// Append-only writer over one column file.
#[derive(Debug)]
pub struct FsColumnWriter {
    path: PathBuf,
    ordinal: AttributeOrdinal,
    width: usize,
    sync_policy: SyncPolicy,
    file: Option<File>,
}

impl ColumnWriter for FsColumnWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn ordinal(&self) -> AttributeOrdinal {
        self.ordinal
    }

    fn append_record(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != self.width {
            return Err(Error::invalid_argument(format!(
                "record for \"{}\" must be {} bytes, got {}",
                self.path.display(),
                self.width,
                bytes.len()
            )));
        }
        let Some(file) = self.file.as_mut() else {
            return Err(Error::Internal(format!(
                "append to closed column file \"{}\"",
                self.path.display()
            )));
        };

        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|e| Error::file_access(&self.path, e))?;
        if self.sync_policy == SyncPolicy::SyncData {
            file.sync_data()
                .map_err(|e| Error::file_access(&self.path, e))?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            tracing::trace!(path = %self.path.display(), "closed column writer");
        }
    }
}
