//! In-memory read-through cache with per-entry expiry.
//!
//! The external sheet is slow to read and changes rarely within a session,
//! so range reads are memoized here for a short TTL. `clear()` is the
//! invalidation primitive the assignment write path uses to force the next
//! read back upstream.

// Allow dead code: size accessors are used by tests and logging
#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// A cached value together with its capture time.
#[derive(Debug, Clone)]
pub struct CachedEntry<V> {
    pub data: V,
    pub cached_at: DateTime<Utc>,
}

impl<V> CachedEntry<V> {
    fn new(data: V) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        let age = Utc::now() - self.cached_at;
        age < chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero())
    }
}

/// Generic key -> value store with time-based expiry.
///
/// No interior locking: the owner wraps this in a `tokio::sync::Mutex` when
/// it is shared across request handlers. An expired entry behaves exactly
/// like a missing one and is evicted on the `get` that observes it.
#[derive(Debug)]
pub struct TimedCache<V> {
    entries: HashMap<String, CachedEntry<V>>,
    ttl: Duration,
}

impl<V> TimedCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Store a value under `key`, unconditionally overwriting any previous
    /// entry and restarting its TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), CachedEntry::new(value));
    }

    /// Return the cached value if present and still fresh, evicting it when
    /// stale.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let fresh = match self.entries.get(key) {
            Some(entry) => entry.is_fresh(self.ttl),
            None => return None,
        };
        if !fresh {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.data)
    }

    /// Drop every entry. Used after a successful write so that all readers
    /// see post-write data.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn backdate(&mut self, key: &str, age: chrono::Duration) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.cached_at = Utc::now() - age;
        }
    }
}
