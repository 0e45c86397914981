//! Naming of the files that make up a table's storage.
//!
//! ```text
//! <root>          main fork, created empty
//! <root>_init     init fork (unlogged tables only)
//! <root>.1        column file of attribute ordinal 0
//! <root>.N        column file of attribute ordinal N-1
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use colfile_types::AttributeOrdinal;

use crate::constants::{COLUMN_FILE_SEPARATOR, INIT_FORK_SUFFIX};

fn with_suffix(root: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(root.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Column file of the zero-based `ordinal`: `<root>.<ordinal + 1>`.
pub fn column_file_path(root: &Path, ordinal: AttributeOrdinal) -> PathBuf {
    with_suffix(root, &format!("{COLUMN_FILE_SEPARATOR}{}", ordinal + 1))
}

/// Init fork of an unlogged table: `<root>_init`.
pub fn init_fork_path(root: &Path) -> PathBuf {
    with_suffix(root, INIT_FORK_SUFFIX)
}
