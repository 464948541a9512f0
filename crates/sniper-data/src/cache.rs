//! Short-TTL cache for market snapshots.
//!
//! Quotes go stale within seconds; the cache exists only to coalesce bursts
//! of requests for the same symbol, not to persist anything.

use sniper_core::{Clock, MarketSnapshot, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

struct Entry {
    snapshot: MarketSnapshot,
    inserted: Instant,
}

/// TTL cache keyed by upper-cased symbol.
pub struct SnapshotCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a live entry; expired entries are removed on the way out.
    pub fn get(&self, symbol: &str) -> Option<MarketSnapshot> {
        let key = symbol.to_uppercase();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some(entry) if self.clock.now().duration_since(entry.inserted) < self.ttl => {
                Some(entry.snapshot.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, snapshot: MarketSnapshot) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            snapshot.symbol.to_uppercase(),
            Entry {
                snapshot,
                inserted: self.clock.now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_core::ManualClock;

    fn cache_with_clock(ttl_secs: u64) -> (SnapshotCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = SnapshotCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_clock(10);
        cache.insert(MarketSnapshot::degraded("aapl", 150.0));

        clock.advance(Duration::from_secs(9));
        let hit = cache.get("AAPL").unwrap();
        assert_eq!(hit.price, 150.0);
    }

    #[test]
    fn test_expires_after_ttl() {
        let (cache, clock) = cache_with_clock(10);
        cache.insert(MarketSnapshot::degraded("AAPL", 150.0));

        clock.advance(Duration::from_secs(10));
        assert!(cache.get("AAPL").is_none());
        // Expired entry was evicted, not just hidden
        assert!(cache.is_empty());
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        let (cache, _clock) = cache_with_clock(10);
        cache.insert(MarketSnapshot::degraded("msft", 400.0));
        assert!(cache.get("msft").is_some());
        assert!(cache.get("MSFT").is_some());
    }

    #[test]
    fn test_insert_replaces() {
        let (cache, _clock) = cache_with_clock(10);
        cache.insert(MarketSnapshot::degraded("AAPL", 150.0));
        cache.insert(MarketSnapshot::degraded("AAPL", 151.0));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("AAPL").unwrap().price, 151.0);
    }
}
