use std::path::{Path, PathBuf};

use crate::attribute::AttributeDesc;
use crate::ids::TableId;

/// Durability class of a table, chosen by the host at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persistence {
    #[default]
    Permanent,
    /// Not crash-safe; the host resets it from the init fork after a crash.
    Unlogged,
    Temporary,
}

/// Statistics the host catalog last recorded for a table.
///
/// These are whatever the last vacuum/analyze wrote and may be stale. The
/// size estimator treats `rel_pages == 0` as "never analyzed".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelationStats {
    pub rel_pages: u32,
    pub rel_tuples: f64,
    pub rel_all_visible: u32,
    /// Whether the table has inheritance children / dependent sub-relations.
    pub has_subclass: bool,
}

/// The host's view of a table: schema plus storage location.
///
/// Owned by the host. The storage core only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHandle {
    id: TableId,
    storage_root: PathBuf,
    attributes: Vec<AttributeDesc>,
    stats: RelationStats,
    persistence: Persistence,
}

impl TableHandle {
    pub fn new(id: TableId, storage_root: impl Into<PathBuf>, attributes: Vec<AttributeDesc>) -> Self {
        Self {
            id,
            storage_root: storage_root.into(),
            attributes,
            stats: RelationStats::default(),
            persistence: Persistence::default(),
        }
    }

    pub fn with_stats(mut self, stats: RelationStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Path of the table's main storage file; column files hang off it.
    #[inline]
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    #[inline]
    pub fn attributes(&self) -> &[AttributeDesc] {
        &self.attributes
    }

    #[inline]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute(&self, ordinal: usize) -> Option<&AttributeDesc> {
        self.attributes.get(ordinal)
    }

    #[inline]
    pub fn stats(&self) -> &RelationStats {
        &self.stats
    }

    /// Replace the recorded statistics, as a vacuum/analyze pass would.
    pub fn set_stats(&mut self, stats: RelationStats) {
        self.stats = stats;
    }

    #[inline]
    pub fn persistence(&self) -> Persistence {
        self.persistence
    }
}
