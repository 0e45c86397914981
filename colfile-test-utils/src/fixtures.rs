use std::path::Path;

use colfile_types::{AttributeDesc, TableHandle, TableId};
use tempfile::TempDir;

/// Default relation id used by fixtures, matching the first user OID range.
pub const FIXTURE_TABLE_ID: TableId = 16384;

/// A table whose storage root lives in a private temporary directory.
///
/// The directory (and every column file under it) is removed on drop, so
/// keep the fixture alive for as long as the handle is in use.
#[derive(Debug)]
pub struct TempTable {
    dir: TempDir,
    handle: TableHandle,
}

impl TempTable {
    pub fn new(attributes: Vec<AttributeDesc>) -> Self {
        Self::with_id(FIXTURE_TABLE_ID, attributes)
    }

    pub fn with_id(id: TableId, attributes: Vec<AttributeDesc>) -> Self {
        let dir = TempDir::new().expect("create temp dir for table fixture");
        let handle = TableHandle::new(id, dir.path().join(id.to_string()), attributes);
        Self { dir, handle }
    }

    /// `(id int4, score int4)`, the two-column shape most scenarios use.
    pub fn two_int32() -> Self {
        Self::new(vec![
            AttributeDesc::int32("id"),
            AttributeDesc::int32("score"),
        ])
    }

    pub fn handle(&self) -> &TableHandle {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut TableHandle {
        &mut self.handle
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
