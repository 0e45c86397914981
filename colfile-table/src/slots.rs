//! Registry of the host's table access-method slots.
//!
//! The host's interface has far more entry points than the columnar core
//! implements. Every slot is listed here exactly once, either as a
//! [`CoreSlot`] with real behavior or as an [`UnsupportedOperation`] that is
//! always answered with [`Error::FeatureNotSupported`].

use colfile_result::Error;

/// Slots backed by the columnar core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreSlot {
    SlotCallbacks,
    BeginScan,
    BeginScanWithProjection,
    SetScanLimits,
    ScanNext,
    EndScan,
    InsertRow,
    EstimateSize,
    InitializeStorage,
}

impl CoreSlot {
    pub fn name(self) -> &'static str {
        match self {
            CoreSlot::SlotCallbacks => "slot_callbacks",
            CoreSlot::BeginScan => "scan_begin",
            CoreSlot::BeginScanWithProjection => "scan_begin_with_column_projection",
            CoreSlot::SetScanLimits => "scan_set_limits",
            CoreSlot::ScanNext => "scan_getnextslot",
            CoreSlot::EndScan => "scan_end",
            CoreSlot::InsertRow => "tuple_insert",
            CoreSlot::EstimateSize => "relation_estimate_size",
            CoreSlot::InitializeStorage => "relation_set_new_filenode",
        }
    }
}

/// Slots that exist in the dispatch table but are not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedOperation {
    TupleSatisfiesSnapshot,
    BeginIndexFetch,
    ResetIndexFetch,
    EndIndexFetch,
    IndexFetchTuple,
    FetchRowVersion,
    InsertSpeculative,
    CompleteSpeculative,
    Delete,
    Update,
    LockTuple,
    FinishBulkInsert,
    BitmapPageScan,
    BitmapPageScanNext,
    SampleNextBlock,
    SampleNextTuple,
    AnalyzeNextBlock,
    AnalyzeNextTuple,
    NontransactionalTruncate,
    CopyData,
}

impl UnsupportedOperation {
    pub const ALL: [UnsupportedOperation; 20] = [
        UnsupportedOperation::TupleSatisfiesSnapshot,
        UnsupportedOperation::BeginIndexFetch,
        UnsupportedOperation::ResetIndexFetch,
        UnsupportedOperation::EndIndexFetch,
        UnsupportedOperation::IndexFetchTuple,
        UnsupportedOperation::FetchRowVersion,
        UnsupportedOperation::InsertSpeculative,
        UnsupportedOperation::CompleteSpeculative,
        UnsupportedOperation::Delete,
        UnsupportedOperation::Update,
        UnsupportedOperation::LockTuple,
        UnsupportedOperation::FinishBulkInsert,
        UnsupportedOperation::BitmapPageScan,
        UnsupportedOperation::BitmapPageScanNext,
        UnsupportedOperation::SampleNextBlock,
        UnsupportedOperation::SampleNextTuple,
        UnsupportedOperation::AnalyzeNextBlock,
        UnsupportedOperation::AnalyzeNextTuple,
        UnsupportedOperation::NontransactionalTruncate,
        UnsupportedOperation::CopyData,
    ];

    /// Host-facing slot name, reported in the error message.
    pub fn name(self) -> &'static str {
        match self {
            UnsupportedOperation::TupleSatisfiesSnapshot => "tuple_satisfies_snapshot",
            UnsupportedOperation::BeginIndexFetch => "begin_index_fetch",
            UnsupportedOperation::ResetIndexFetch => "reset_index_fetch",
            UnsupportedOperation::EndIndexFetch => "end_index_fetch",
            UnsupportedOperation::IndexFetchTuple => "index_fetch_tuple",
            UnsupportedOperation::FetchRowVersion => "tuple_fetch_row_version",
            UnsupportedOperation::InsertSpeculative => "tuple_insert_speculative",
            UnsupportedOperation::CompleteSpeculative => "tuple_complete_speculative",
            UnsupportedOperation::Delete => "tuple_delete",
            UnsupportedOperation::Update => "tuple_update",
            UnsupportedOperation::LockTuple => "tuple_lock",
            UnsupportedOperation::FinishBulkInsert => "finish_bulk_insert",
            UnsupportedOperation::BitmapPageScan => "scan_bitmap_pagescan",
            UnsupportedOperation::BitmapPageScanNext => "scan_bitmap_pagescan_next",
            UnsupportedOperation::SampleNextBlock => "scan_sample_next_block",
            UnsupportedOperation::SampleNextTuple => "scan_sample_next_tuple",
            UnsupportedOperation::AnalyzeNextBlock => "scan_analyze_next_block",
            UnsupportedOperation::AnalyzeNextTuple => "scan_analyze_next_tuple",
            UnsupportedOperation::NontransactionalTruncate => {
                "relation_nontransactional_truncate"
            }
            UnsupportedOperation::CopyData => "relation_copy_data",
        }
    }

    #[inline]
    pub fn to_error(self) -> Error {
        Error::feature_not_supported(self.name())
    }
}

impl From<UnsupportedOperation> for Error {
    fn from(op: UnsupportedOperation) -> Self {
        op.to_error()
    }
}

/// One entry of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmSlot {
    Core(CoreSlot),
    Unimplemented(UnsupportedOperation),
}

impl AmSlot {
    pub fn name(self) -> &'static str {
        match self {
            AmSlot::Core(slot) => slot.name(),
            AmSlot::Unimplemented(op) => op.name(),
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, AmSlot::Core(_))
    }
}

/// Every slot of the dispatch table, in the host's declaration order.
pub const SLOTS: &[AmSlot] = &[
    AmSlot::Core(CoreSlot::SlotCallbacks),
    AmSlot::Unimplemented(UnsupportedOperation::TupleSatisfiesSnapshot),
    AmSlot::Core(CoreSlot::BeginScan),
    AmSlot::Core(CoreSlot::BeginScanWithProjection),
    AmSlot::Core(CoreSlot::SetScanLimits),
    AmSlot::Core(CoreSlot::ScanNext),
    AmSlot::Core(CoreSlot::EndScan),
    AmSlot::Unimplemented(UnsupportedOperation::BitmapPageScan),
    AmSlot::Unimplemented(UnsupportedOperation::BitmapPageScanNext),
    AmSlot::Unimplemented(UnsupportedOperation::SampleNextBlock),
    AmSlot::Unimplemented(UnsupportedOperation::SampleNextTuple),
    AmSlot::Unimplemented(UnsupportedOperation::FetchRowVersion),
    AmSlot::Unimplemented(UnsupportedOperation::IndexFetchTuple),
    AmSlot::Core(CoreSlot::InsertRow),
    AmSlot::Unimplemented(UnsupportedOperation::InsertSpeculative),
    AmSlot::Unimplemented(UnsupportedOperation::CompleteSpeculative),
    AmSlot::Unimplemented(UnsupportedOperation::Delete),
    AmSlot::Unimplemented(UnsupportedOperation::Update),
    AmSlot::Unimplemented(UnsupportedOperation::LockTuple),
    AmSlot::Unimplemented(UnsupportedOperation::FinishBulkInsert),
    AmSlot::Unimplemented(UnsupportedOperation::AnalyzeNextBlock),
    AmSlot::Unimplemented(UnsupportedOperation::AnalyzeNextTuple),
    AmSlot::Unimplemented(UnsupportedOperation::NontransactionalTruncate),
    AmSlot::Core(CoreSlot::InitializeStorage),
    AmSlot::Unimplemented(UnsupportedOperation::CopyData),
    AmSlot::Core(CoreSlot::EstimateSize),
    AmSlot::Unimplemented(UnsupportedOperation::BeginIndexFetch),
    AmSlot::Unimplemented(UnsupportedOperation::ResetIndexFetch),
    AmSlot::Unimplemented(UnsupportedOperation::EndIndexFetch),
];
