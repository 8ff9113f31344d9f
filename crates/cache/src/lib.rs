//! Bounded memoization cache for wisteria.
//!
//! Derived theme data (accessibility reports, CSS variable maps, contrast
//! ratios) is cheap to recompute but requested on every render. This crate
//! provides a small generic cache with two bounds:
//!
//! - **Capacity**: inserting a new key into a full cache evicts the least
//!   recently used entry first.
//! - **Staleness**: an entry older than `max_age` (measured from insertion
//!   or last access) is treated as absent and dropped lazily when touched.
//!
//! Expiry is evaluated at access time; there is no background sweep thread.
//! Callers that want proactive cleanup can call [`BoundedCache::evict_expired`]
//! periodically, but correctness never depends on it running.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    /// Insertion or last-access time; age is measured from here.
    touched: Instant,
}

/// Generic key/value cache with TTL expiry and LRU eviction.
///
/// All operations are total: a lookup on a missing or expired key reports
/// absence, it never fails.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    max_age: Duration,
    entries: HashMap<K, Entry<V>>,
    /// Recency order: front is least recently used, back is most recent.
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each valid for
    /// `max_age` after its last access.
    pub fn new(capacity: usize, max_age: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            max_age,
            entries: HashMap::with_capacity(capacity.max(1)),
            order: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Look up a key, refreshing its recency and age on a hit.
    ///
    /// An expired entry is evicted as a side effect and reported absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => entry.touched.elapsed() > self.max_age,
        };
        if expired {
            self.remove(key);
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touched = Instant::now();
        let value = entry.value.clone();
        self.promote(key);
        Some(value)
    }

    /// Insert or overwrite an entry.
    ///
    /// If the cache is full and `key` is new, the least recently used entry
    /// is evicted first.
    pub fn set(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.entries.insert(
                key.clone(),
                Entry {
                    value,
                    touched: Instant::now(),
                },
            );
            self.promote(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.entries.insert(
            key.clone(),
            Entry {
                value,
                touched: Instant::now(),
            },
        );
        self.order.push_back(key);
    }

    /// Read-only presence check with the same expiry semantics as [`get`],
    /// but without refreshing recency.
    ///
    /// An expired key is evicted and never reported present.
    ///
    /// [`get`]: BoundedCache::get
    pub fn has(&mut self, key: &K) -> bool {
        let expired = match self.entries.get(key) {
            None => return false,
            Some(entry) => entry.touched.elapsed() > self.max_age,
        };
        if expired {
            self.remove(key);
            return false;
        }
        true
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of currently held (not necessarily unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries before LRU eviction occurs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum entry age before expiry.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Drop every expired entry now instead of lazily at access time.
    ///
    /// Returns the number of entries evicted.
    pub fn evict_expired(&mut self) -> usize {
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.touched.elapsed() > self.max_age)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    /// Move a key to the most-recently-used position.
    fn promote(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }

    fn remove(&mut self, key: &K) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG: Duration = Duration::from_secs(60);

    #[test]
    fn test_get_returns_inserted_value() {
        let mut cache = BoundedCache::new(4, LONG);
        cache.set("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut cache = BoundedCache::new(4, LONG);
        cache.set("a", 1);
        cache.set("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let mut cache = BoundedCache::new(3, LONG);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        // No reads in between: "a" is the least recently used.
        cache.set("d", 4);
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
        assert!(cache.has(&"d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut cache = BoundedCache::new(5, LONG);
        for i in 0..20 {
            cache.set(i, i);
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = BoundedCache::new(2, LONG);
        cache.set("a", 1);
        cache.set("b", 2);
        // Touch "a" so "b" becomes the LRU entry.
        assert_eq!(cache.get(&"a"), Some(1));
        cache.set("c", 3);
        assert!(cache.has(&"a"));
        assert!(!cache.has(&"b"));
    }

    #[test]
    fn test_has_does_not_refresh_recency() {
        let mut cache = BoundedCache::new(2, LONG);
        cache.set("a", 1);
        cache.set("b", 2);
        // A read-only check must leave "a" as the LRU entry.
        assert!(cache.has(&"a"));
        cache.set("c", 3);
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
    }

    #[test]
    fn test_expired_entry_absent_from_get_and_has() {
        let mut cache = BoundedCache::new(4, Duration::from_millis(10));
        cache.set("a", 1);
        sleep(Duration::from_millis(25));
        assert!(!cache.has(&"a"));
        cache.set("b", 2);
        sleep(Duration::from_millis(25));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_get_keeps_entry_alive() {
        let mut cache = BoundedCache::new(4, Duration::from_millis(40));
        cache.set("a", 1);
        // Each read renews the entry's age.
        for _ in 0..4 {
            sleep(Duration::from_millis(15));
            assert_eq!(cache.get(&"a"), Some(1));
        }
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut cache = BoundedCache::new(4, LONG);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_evict_expired_sweep() {
        let mut cache = BoundedCache::new(8, Duration::from_millis(10));
        cache.set("a", 1);
        cache.set("b", 2);
        sleep(Duration::from_millis(25));
        cache.set("c", 3);
        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.has(&"c"));
    }
}
