//! Reader configuration

use std::num::NonZeroUsize;

/// Number of decoded pages a [`Database`](crate::Database) keeps by default
pub const DEFAULT_PAGE_CACHE_CAPACITY: usize = 64;

/// Options for opening a [`Database`](crate::Database)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum number of decoded pages kept in the LRU cache
    pub page_cache_capacity: NonZeroUsize,
    /// Reject files whose header does not start with the `SQLite` magic string
    pub require_magic: bool,
}

impl ReaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_cache_capacity: NonZeroUsize::new(DEFAULT_PAGE_CACHE_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            require_magic: true,
        }
    }

    #[must_use]
    pub const fn with_page_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.page_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_require_magic(mut self, require_magic: bool) -> Self {
        self.require_magic = require_magic;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new()
    }
}
