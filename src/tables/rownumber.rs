//! Row number allocation.
//!
//! Every row carries a number that is unique within its allocator and serves as the key of
//! last resort for tables without primary-key columns. Numbers come from a
//! [`RowNumberAllocator`]; tables use the process-wide [`RowNumberAllocator::shared`] instance
//! unless one is injected, which lets tests isolate numbering.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, OnceLock,
};

/// Atomic, monotonically increasing row number source.
#[derive(Debug)]
pub struct RowNumberAllocator {
    next: AtomicU64,
}

impl RowNumberAllocator {
    /// The first number handed out by a new or reset allocator
    pub const FIRST: u64 = 1;

    /// Creates an allocator starting at [`RowNumberAllocator::FIRST`]
    #[must_use]
    pub fn new() -> Self {
        RowNumberAllocator {
            next: AtomicU64::new(Self::FIRST),
        }
    }

    /// The process-wide allocator used by default
    #[must_use]
    pub fn shared() -> Arc<RowNumberAllocator> {
        static SHARED: OnceLock<Arc<RowNumberAllocator>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(RowNumberAllocator::new()))
            .clone()
    }

    /// Returns a fresh number
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the number the next call to [`RowNumberAllocator::allocate`] will hand out
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restarts numbering at [`RowNumberAllocator::FIRST`].
    ///
    /// Rows numbered before the reset keep their numbers, so only reset an allocator whose
    /// rows are no longer compared with new ones.
    pub fn reset(&self) {
        self.next.store(Self::FIRST, Ordering::Relaxed);
    }
}

impl Default for RowNumberAllocator {
    fn default() -> Self {
        Self::new()
    }
}
