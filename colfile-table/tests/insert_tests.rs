use std::fs;

use colfile_result::Error;
use colfile_storage::{FsColumnStore, InstrumentedStore, column_file_path};
use colfile_table::{ColumnarAccessMethod, TableAccessMethod};
use colfile_test_utils::TempTable;
use colfile_types::{
    AttributeDesc, AttributeType, Persistence, RowBuffer, Snapshot, TableHandle, Value,
};

fn file_len(table: &TableHandle, ordinal: usize) -> u64 {
    fs::metadata(column_file_path(table.storage_root(), ordinal))
        .map(|m| m.len())
        .unwrap_or(0)
}

fn count_rows<A: TableAccessMethod>(am: &A, table: &TableHandle) -> usize {
    let mut cursor = am.begin_scan(table, Snapshot::default()).unwrap();
    let mut row = RowBuffer::new(table.attribute_count());
    let mut n = 0;
    while am.scan_next(&mut cursor, &mut row).unwrap() {
        n += 1;
    }
    am.end_scan(&mut cursor);
    n
}

#[test]
fn column_files_stay_in_step() {
    let t = TempTable::new(vec![
        AttributeDesc::bool("flag"),
        AttributeDesc::int16("small"),
        AttributeDesc::int64("big"),
        AttributeDesc::float64("ratio"),
        AttributeDesc::fixed_binary("tag", 6),
    ]);
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    for i in 0..5i64 {
        am.insert_row(
            t.handle(),
            &[
                Value::Bool(i % 2 == 0),
                Value::Int16(i as i16),
                Value::Int64(i * 1_000_000_007),
                Value::Float64(i as f64 / 4.0),
                Value::Bytes(vec![i as u8; 6]),
            ],
        )
        .unwrap();
    }

    let widths = [1u64, 2, 8, 8, 6];
    for (ordinal, width) in widths.iter().enumerate() {
        assert_eq!(file_len(t.handle(), ordinal), 5 * width, "column {ordinal}");
    }
    assert_eq!(count_rows(&am, t.handle()), 5);
}

#[test]
fn null_after_three_rows_leaves_three_rows() {
    let t = TempTable::two_int32();
    let (store, stats) = InstrumentedStore::new(FsColumnStore::default());
    let am = ColumnarAccessMethod::new(store);
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();
    for (a, b) in [(1, 10), (2, 20), (3, 30)] {
        am.insert_row(t.handle(), &[Value::Int32(a), Value::Int32(b)])
            .unwrap();
    }
    let before = stats.snapshot();

    let err = am
        .insert_row(t.handle(), &[Value::Int32(4), Value::Null])
        .unwrap_err();
    assert!(matches!(err, Error::NullValueUnsupported { attribute: 1 }));
    assert_eq!(stats.snapshot().delta_since(&before).records_appended, 0);
    assert_eq!(file_len(t.handle(), 0), 12);
    assert_eq!(file_len(t.handle(), 1), 12);
    assert_eq!(count_rows(&am, t.handle()), 3);
}

#[test]
fn variable_width_attribute_rejects_insert() {
    let t = TempTable::new(vec![
        AttributeDesc::int32("id"),
        AttributeDesc::varlena("body"),
    ]);
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let err = am
        .insert_row(
            t.handle(),
            &[Value::Int32(1), Value::Bytes(b"hello".to_vec())],
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedColumnType { attribute: 1, .. }));
    assert_eq!(file_len(t.handle(), 0), 0);
}

#[test]
fn by_reference_values_store_their_content() {
    let t = TempTable::new(vec![AttributeDesc::fixed_binary("uuid", 16)]);
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let id: Vec<u8> = (100u8..116).collect();
    am.insert_row(t.handle(), &[Value::Bytes(id.clone())])
        .unwrap();

    let on_disk = fs::read(column_file_path(t.handle().storage_root(), 0)).unwrap();
    assert_eq!(on_disk, id);

    let mut cursor = am.begin_scan(t.handle(), Snapshot::default()).unwrap();
    let mut row = RowBuffer::new(1);
    assert!(am.scan_next(&mut cursor, &mut row).unwrap());
    assert_eq!(row.value(0).and_then(Value::as_bytes), Some(id.as_slice()));
}

#[test]
fn by_reference_numerics_round_trip() {
    // Hosts without by-value 8-byte datums pass int8 and float8 by reference.
    let t = TempTable::new(vec![
        AttributeDesc::from_parts("big", 8, false, AttributeType::Int64),
        AttributeDesc::from_parts("ratio", 8, false, AttributeType::Float64),
    ]);
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    am.insert_row(t.handle(), &[Value::Int64(42), Value::Float64(-1.5)])
        .unwrap();
    am.insert_row(t.handle(), &[Value::Int64(i64::MIN), Value::Float64(0.25)])
        .unwrap();

    let on_disk = fs::read(column_file_path(t.handle().storage_root(), 0)).unwrap();
    assert_eq!(&on_disk[..8], &42i64.to_le_bytes());

    let mut cursor = am.begin_scan(t.handle(), Snapshot::default()).unwrap();
    let mut row = RowBuffer::new(2);
    let mut big = Vec::new();
    let mut ratios = Vec::new();
    let mut rows = Vec::new();
    while am.scan_next(&mut cursor, &mut row).unwrap() {
        big.extend(row.value(0).and_then(Value::as_i64));
        ratios.extend(row.project(&[1]));
        rows.push(row.clone().into_values());
    }
    am.end_scan(&mut cursor);

    assert_eq!(big, vec![42, i64::MIN]);
    assert_eq!(ratios, vec![Value::Float64(-1.5), Value::Float64(0.25)]);
    assert_eq!(
        rows,
        vec![
            vec![Value::Int64(42), Value::Float64(-1.5)],
            vec![Value::Int64(i64::MIN), Value::Float64(0.25)],
        ]
    );
}

#[test]
fn zero_width_column_is_rejected() {
    let t = TempTable::new(vec![
        AttributeDesc::int32("id"),
        AttributeDesc::fixed_binary("empty", 0),
    ]);
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let err = am
        .insert_row(t.handle(), &[Value::Int32(1), Value::Bytes(Vec::new())])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedColumnType {
            attribute: 1,
            width: 0
        }
    ));
    assert_eq!(file_len(t.handle(), 0), 0);

    let err = am.begin_scan(t.handle(), Snapshot::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedColumnType { attribute: 1, .. }));
}

#[test]
fn type_mismatch_is_rejected_without_writes() {
    let t = TempTable::two_int32();
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let err = am
        .insert_row(t.handle(), &[Value::Int32(1), Value::Float64(2.0)])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
    assert_eq!(file_len(t.handle(), 0), 0);
}
