//! Cache Entry Module
//!
//! Defines the metadata kept for each live key: its payload, accounted
//! weight, absolute expiration instant and position in the recency list.

use std::time::{Duration, Instant};

use crate::cache::lru::RecencyHandle;

// == Weight Policy ==
/// Signature of the size-calculation hook used to weigh an entry.
pub type Weigher = fn(key: &str, value: &str) -> usize;

/// Fixed-weight policy: every entry costs exactly one unit, regardless of
/// the payload length.
pub fn unit_weight(_key: &str, _value: &str) -> usize {
    1
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Accounted cost against the weight ceiling
    pub weight: usize,
    /// Instant after which the entry is logically absent, None = no expiration
    pub expires_at: Option<Instant>,
    /// Position of this entry in the recency list
    pub handle: RecencyHandle,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    ///
    /// A zero `ttl` disables expiration for the entry.
    pub fn new(
        value: String,
        weight: usize,
        ttl: Duration,
        now: Instant,
        handle: RecencyHandle,
    ) -> Self {
        Self {
            value,
            weight,
            expires_at: expiration_for(ttl, now),
            handle,
        }
    }

    // == Refresh ==
    /// Replaces the payload and restarts the TTL from `now`.
    ///
    /// Returns the weight the entry carried before the refresh so the caller
    /// can settle the size accounting.
    pub fn refresh(&mut self, value: String, weight: usize, ttl: Duration, now: Instant) -> usize {
        let previous = self.weight;
        self.value = value;
        self.weight = weight;
        self.expires_at = expiration_for(ttl, now);
        previous
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its expiration instant, so an
    /// entry whose TTL has fully elapsed is never served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

/// Computes the absolute expiration instant for an entry written at `now`.
///
/// Zero TTL and an instant that cannot be represented both mean the entry
/// never expires.
fn expiration_for(ttl: Duration, now: Instant) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::lru::RecencyList;
    use std::thread::sleep;

    fn handle() -> RecencyHandle {
        RecencyList::new().push_front("k".to_string())
    }

    #[test]
    fn test_unit_weight_ignores_payload() {
        assert_eq!(unit_weight("", ""), 1);
        assert_eq!(unit_weight("key", &"x".repeat(10_000)), 1);
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("v".to_string(), 1, Duration::from_secs(60), now, handle());

        assert_eq!(entry.value, "v");
        assert_eq!(entry.weight, 1);
        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let now = Instant::now();
        let entry = CacheEntry::new("v".to_string(), 1, Duration::ZERO, now, handle());

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired_at(now + Duration::from_secs(86_400)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let ttl = Duration::from_secs(5);
        let entry = CacheEntry::new("v".to_string(), 1, ttl, now, handle());

        assert!(!entry.is_expired_at(now + ttl - Duration::from_millis(1)));
        assert!(entry.is_expired_at(now + ttl), "Entry should be expired at boundary");
    }

    #[test]
    fn test_entry_expiration_wall_clock() {
        let entry = CacheEntry::new(
            "v".to_string(),
            1,
            Duration::from_millis(50),
            Instant::now(),
            handle(),
        );
        assert!(!entry.is_expired_at(Instant::now()));

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired_at(Instant::now()));
    }

    #[test]
    fn test_refresh_resets_ttl_and_reports_old_weight() {
        let t0 = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut entry = CacheEntry::new("old".to_string(), 3, ttl, t0, handle());

        let t1 = t0 + Duration::from_secs(8);
        let previous = entry.refresh("new".to_string(), 1, ttl, t1);

        assert_eq!(previous, 3);
        assert_eq!(entry.value, "new");
        assert_eq!(entry.weight, 1);
        assert!(!entry.is_expired_at(t0 + ttl));
        assert!(entry.is_expired_at(t1 + ttl));
    }
}
