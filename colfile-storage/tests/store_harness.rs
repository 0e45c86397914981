//! Shared test harness for all ColumnFileStore implementations.
//!
//! Verifies for any store:
//! - Roundtrip: records appended to a column file come back in order,
//!   followed by end-of-file.
//! - Reopen: appended records survive dropping the store and opening again.
//! - Corruption: a trailing partial record surfaces as `FileAccess`.
//! - Missing files: opening a column file that does not exist is `FileAccess`
//!   and names the path.
//! - Layout: `create_storage` creates the main fork and every column file,
//!   plus a synced init fork for unlogged tables.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use colfile_result::Error;
use colfile_storage::{
    ColumnFileStore, ColumnReader, ColumnWriter, Record, column_file_path, init_fork_path,
};
use colfile_types::{AttributeDesc, Persistence, TableHandle};
use tempfile::TempDir;

/// Two-column (int32, 16-byte by-reference) table rooted in `dir`.
pub fn sample_table(dir: &Path) -> TableHandle {
    TableHandle::new(
        16384,
        dir.join("16384"),
        vec![
            AttributeDesc::int32("id"),
            AttributeDesc::fixed_binary("token", 16),
        ],
    )
}

fn read_all<R: ColumnReader>(reader: &mut R) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        match reader.read_next_record().expect("read") {
            Record::Data(bytes) => out.push(bytes.to_vec()),
            Record::EndOfFile => break,
        }
    }
    out
}

/// Append three records to attribute 0 and read them back.
pub fn run_append_read_roundtrip<S, F>(make: F)
where
    S: ColumnFileStore,
    F: FnOnce() -> S,
{
    let tmp = TempDir::new().expect("tempdir");
    let table = sample_table(tmp.path());
    let store = make();
    store
        .create_storage(&table, Persistence::Permanent)
        .expect("create storage");

    let mut writer = store.open_for_append(&table, 0).expect("open append");
    for v in [7i32, 8, 9] {
        writer.append_record(&v.to_le_bytes()).expect("append");
    }
    writer.close();

    let mut reader = store.open_for_read(&table, 0).expect("open read");
    let got = read_all(&mut reader);
    assert_eq!(
        got,
        vec![
            7i32.to_le_bytes().to_vec(),
            8i32.to_le_bytes().to_vec(),
            9i32.to_le_bytes().to_vec()
        ]
    );

    // Untouched column stays empty.
    let mut other = store.open_for_read(&table, 1).expect("open read");
    assert!(read_all(&mut other).is_empty());
}

/// Data written through one store instance is visible through the next.
pub fn run_reopen_behavior<S, Make>(make: Make)
where
    S: ColumnFileStore,
    Make: Fn() -> S,
{
    let tmp = TempDir::new().expect("tempdir");
    let table = sample_table(tmp.path());

    let store1 = make();
    store1
        .create_storage(&table, Persistence::Permanent)
        .expect("create storage");
    let mut w = store1.open_for_append(&table, 1).expect("open append");
    w.append_record(&[0xCD; 16]).expect("append");
    drop(w);
    drop(store1);

    let store2 = make();
    let mut r = store2.open_for_read(&table, 1).expect("reopen");
    assert_eq!(read_all(&mut r), vec![vec![0xCD; 16]]);
}

/// A file whose length is not a multiple of the width is corrupt.
pub fn run_partial_record_is_corruption<S, F>(make: F)
where
    S: ColumnFileStore,
    F: FnOnce() -> S,
{
    let tmp = TempDir::new().expect("tempdir");
    let table = sample_table(tmp.path());
    let store = make();
    store
        .create_storage(&table, Persistence::Permanent)
        .expect("create storage");

    // One full int32 followed by half of another.
    let path = column_file_path(table.storage_root(), 0);
    fs::write(&path, [1, 0, 0, 0, 2, 0]).expect("write raw");

    let mut reader = store.open_for_read(&table, 0).expect("open read");
    assert_eq!(
        reader.read_next_record().expect("first record"),
        Record::Data(&[1, 0, 0, 0])
    );
    match reader.read_next_record() {
        Err(Error::FileAccess { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), ErrorKind::InvalidData);
        }
        other => panic!("expected FileAccess, got {other:?}"),
    }
}

/// Opening a column file that was never created fails with its path.
pub fn run_missing_file_is_file_access<S, F>(make: F)
where
    S: ColumnFileStore,
    F: FnOnce() -> S,
{
    let tmp = TempDir::new().expect("tempdir");
    let table = sample_table(tmp.path());
    let store = make();

    match store.open_for_read(&table, 1) {
        Err(Error::FileAccess { path, source }) => {
            assert_eq!(path, column_file_path(table.storage_root(), 1));
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected FileAccess, got {:?}", other.err()),
    }
}

/// `create_storage` lays out the expected files for each persistence.
pub fn run_create_storage_layout<S, Make>(make: Make)
where
    S: ColumnFileStore,
    Make: Fn() -> S,
{
    for persistence in [Persistence::Permanent, Persistence::Unlogged] {
        let tmp = TempDir::new().expect("tempdir");
        let table = sample_table(tmp.path());
        let store = make();
        store
            .create_storage(&table, persistence)
            .expect("create storage");

        let root = table.storage_root();
        assert!(root.exists(), "main fork missing");
        for ordinal in 0..table.attribute_count() {
            let col = column_file_path(root, ordinal);
            let meta = fs::metadata(&col).expect("column file exists");
            assert_eq!(meta.len(), 0, "column file {} not empty", col.display());
        }
        assert_eq!(
            init_fork_path(root).exists(),
            persistence == Persistence::Unlogged,
            "init fork presence for {persistence:?}"
        );
        assert_eq!(store.allocated_pages(&table).expect("pages"), 0);
    }
}
