/// Separator between a table's storage root and a column file's ordinal.
pub const COLUMN_FILE_SEPARATOR: char = '.';

/// Suffix of the init fork created for unlogged tables.
pub const INIT_FORK_SUFFIX: &str = "_init";

/// Page size used to report allocated pages to the planner.
pub const DEFAULT_PAGE_SIZE: usize = 8192;
