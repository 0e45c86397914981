//! colfile: columnar table storage for a host database's access-method
//! interface.
//!
//! Every attribute of a table lives in its own file of fixed-width records,
//! named `<storage-root>.<ordinal>` with one-based ordinals. Row *i* is the
//! *i*-th record of every file, so scans that project a subset of the
//! attributes only ever open those attributes' files.
//!
//! # Quick Start
//!
//! ```rust
//! use colfile::{
//!     AttributeDesc, ColumnarAccessMethod, Persistence, RowBuffer, Snapshot, TableAccessMethod,
//!     TableHandle, Value,
//! };
//!
//! let dir = tempfile::tempdir().unwrap();
//! let table = TableHandle::new(
//!     16384,
//!     dir.path().join("16384"),
//!     vec![AttributeDesc::int32("id"), AttributeDesc::int32("score")],
//! );
//!
//! let am: ColumnarAccessMethod = ColumnarAccessMethod::default();
//! am.initialize_storage(&table, Persistence::Permanent).unwrap();
//! am.insert_row(&table, &[Value::Int32(1), Value::Int32(10)]).unwrap();
//!
//! let mut cursor = am.begin_scan(&table, Snapshot::default()).unwrap();
//! let mut row = RowBuffer::new(2);
//! assert!(am.scan_next(&mut cursor, &mut row).unwrap());
//! assert_eq!(row.values(), &[Value::Int32(1), Value::Int32(10)]);
//! assert!(!am.scan_next(&mut cursor, &mut row).unwrap());
//! am.end_scan(&mut cursor);
//! ```
//!
//! # Architecture
//!
//! - **Dispatch** (`colfile-table`): the access-method slot table, scan
//!   cursors, the insert path and the planner size estimator.
//! - **Storage** (`colfile-storage`): the column file store trait, its
//!   filesystem implementation and an instrumented wrapper.
//! - **Types** (`colfile-types`): schema, values, row buffers and the
//!   fixed-width row codec.
//! - **Errors** (`colfile-result`): the shared error type.

pub use colfile_result::{Error, Result};

pub use colfile_types::{
    AttributeDesc, AttributeOrdinal, AttributeType, BlockNumber, Persistence, RelationStats,
    RowBuffer, Snapshot, TableHandle, TableId, TupleId, Value,
};

pub use colfile_table::{
    AmSlot, ColumnarAccessMethod, CoreSlot, EstimatorConfig, Projection, RowBufferKind,
    SLOTS, ScanCursor, ScanState, SizeEstimate, TableAccessMethod, UnsupportedOperation,
};

pub mod storage {
    //! Column file store abstraction and implementations.

    pub use colfile_storage::{
        AttributeIo, ColumnFileStore, ColumnReader, ColumnWriter, FsColumnStore,
        InstrumentedStore, IoStats, IoStatsSnapshot, Record, StorageOptions, SyncPolicy,
        column_file_path, init_fork_path,
    };
}

pub mod codec {
    //! Fixed-width encoding of attribute values.

    pub use colfile_types::codec::{check_value, decode, encode, encode_into};
}
