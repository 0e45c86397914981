use crate::constants::DEFAULT_PAGE_SIZE;

/// How far an append is pushed toward the device before it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// Hand the bytes to the OS (`write` + `flush`). Survives a process
    /// crash, not a power loss.
    Flush,
    /// Additionally `fdatasync` after every append.
    #[default]
    SyncData,
}

/// Run-time configuration for the filesystem column store (no hidden constants).
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub sync_policy: SyncPolicy,
    /// Page size used to turn column-file bytes into an allocated page count.
    pub page_size: usize,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            sync_policy: SyncPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorageOptions {
    pub fn with_sync_policy(mut self, sync_policy: SyncPolicy) -> Self {
        self.sync_policy = sync_policy;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
