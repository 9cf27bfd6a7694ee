//! Size Accounting Module
//!
//! Keeps the running total of accounted weight across live entries and
//! compares it against the fixed ceiling chosen at construction.

// == Size Accountant ==
/// Running weight total with a hard ceiling.
#[derive(Debug, Clone)]
pub struct SizeAccountant {
    /// Summed weight of all live entries
    total: usize,
    /// Maximum summed weight allowed once an operation completes
    max: usize,
}

impl SizeAccountant {
    /// Creates an empty accountant with the given ceiling.
    pub fn new(max: usize) -> Self {
        Self { total: 0, max }
    }

    /// Accounts for an entry entering the cache.
    pub fn add(&mut self, weight: usize) {
        self.total = self.total.saturating_add(weight);
    }

    /// Releases the weight of an entry leaving the cache.
    pub fn subtract(&mut self, weight: usize) {
        debug_assert!(weight <= self.total, "weight released twice");
        self.total = self.total.saturating_sub(weight);
    }

    /// True while the total sits above the ceiling.
    pub fn over_limit(&self) -> bool {
        self.total > self.max
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
