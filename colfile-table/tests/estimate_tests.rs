use colfile_storage::{FsColumnStore, StorageOptions};
use colfile_table::{ColumnarAccessMethod, EstimatorConfig, TableAccessMethod};
use colfile_test_utils::TempTable;
use colfile_types::{AttributeDesc, Persistence, RelationStats, Value};

#[test]
fn fresh_table_is_estimated_at_minimum_pages() {
    let t = TempTable::two_int32();
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let mut widths = [0, 0];
    let est = am.estimate_size(t.handle(), &mut widths).unwrap();
    assert_eq!(est.pages, 10);
    assert_eq!(est.tuples, 2260.0);
    assert_eq!(est.all_visible_fraction, 0.0);
    assert_eq!(widths, [4, 4]);
}

#[test]
fn analyzed_table_uses_allocated_pages() {
    // Small pages so a handful of rows spans several of them.
    let store = FsColumnStore::new(StorageOptions::default().with_page_size(16));
    let mut t = TempTable::new(vec![AttributeDesc::int64("a")]);
    t.handle_mut().set_stats(RelationStats {
        rel_pages: 2,
        rel_tuples: 4.0,
        rel_all_visible: 1,
        has_subclass: false,
    });
    let am = ColumnarAccessMethod::new(store).with_estimator_config(EstimatorConfig {
        page_size: 16,
        ..EstimatorConfig::default()
    });
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();
    for i in 0..5 {
        am.insert_row(t.handle(), &[Value::Int64(i)]).unwrap();
    }

    // 40 bytes over 16-byte pages.
    let est = am.estimate_size(t.handle(), &mut [0]).unwrap();
    assert_eq!(est.pages, 3);
    assert_eq!(est.tuples, 6.0);
    assert!((est.all_visible_fraction - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn fraction_stays_within_unit_interval() {
    for all_visible in [0u32, 1, 5, 10, 1000] {
        let mut t = TempTable::two_int32();
        t.handle_mut().set_stats(RelationStats {
            rel_pages: 10,
            rel_tuples: 100.0,
            rel_all_visible: all_visible,
            has_subclass: false,
        });
        let am = ColumnarAccessMethod::new(FsColumnStore::default());
        am.initialize_storage(t.handle(), Persistence::Permanent)
            .unwrap();
        am.insert_row(t.handle(), &[Value::Int32(1), Value::Int32(2)])
            .unwrap();

        let est = am.estimate_size(t.handle(), &mut [0, 0]).unwrap();
        assert_eq!(est.pages, 1);
        assert!(
            (0.0..=1.0).contains(&est.all_visible_fraction),
            "{all_visible} -> {}",
            est.all_visible_fraction
        );
    }
}

#[test]
fn empty_inheritance_parent_estimates_to_nothing() {
    let mut t = TempTable::two_int32();
    t.handle_mut().set_stats(RelationStats {
        has_subclass: true,
        ..RelationStats::default()
    });
    let am = ColumnarAccessMethod::new(FsColumnStore::default());
    am.initialize_storage(t.handle(), Persistence::Permanent)
        .unwrap();

    let est = am.estimate_size(t.handle(), &mut [0, 0]).unwrap();
    assert_eq!((est.pages, est.tuples, est.all_visible_fraction), (0, 0.0, 0.0));
}
