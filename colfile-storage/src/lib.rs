//! Column file storage for colfile tables.
//!
//! Each table attribute lives in its own file, `<storage-root>.<ordinal + 1>`,
//! holding a raw concatenation of fixed-width records with no header,
//! checksum or null bitmap. This crate owns opening, appending to, reading
//! from and creating those files; it knows nothing about rows or scans.

#![forbid(unsafe_code)]

pub mod constants;

pub mod options;
pub use options::{StorageOptions, SyncPolicy};

pub mod paths;
pub use paths::{column_file_path, init_fork_path};

pub mod store;
pub use store::{
    AttributeIo, ColumnFileStore, ColumnReader, ColumnWriter, FsColumnReader, FsColumnStore,
    FsColumnWriter, InstrumentedReader, InstrumentedStore, InstrumentedWriter, IoStats,
    IoStatsSnapshot, Record, record_width,
};
