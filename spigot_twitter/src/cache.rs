use serde_json::Value;

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const CACHE_CAPACITY: usize = 2000;
pub const CACHE_TTL: Duration = Duration::from_secs(900);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    inserted_at: Instant,
}

/// Short-lived tweet store with consume-on-read semantics. Unlike a
/// conventional re-readable cache, a successful read removes the entry.
/// Entries not read in time expire after the TTL; when full, expired entries
/// are purged first and then the oldest survivor is evicted.
#[derive(Debug, Clone)]
pub struct TweetCache {
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
}

impl TweetCache {
    pub fn new() -> Self {
        Self::with_limits(CACHE_CAPACITY, CACHE_TTL)
    }

    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        TweetCache {
            entries: HashMap::new(),
            capacity,
            ttl,
        }
    }

    /// Insert a payload, overwriting any prior entry for the same id.
    pub fn insert(&mut self, id: String, payload: Value) {
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&id) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            id,
            CacheEntry {
                payload,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Consume-on-read: a hit removes the entry, and an expired entry counts
    /// as a miss so stale data is never returned.
    pub fn take(&mut self, id: &str) -> Option<Value> {
        let entry = self.entries.remove(id)?;
        if entry.inserted_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TweetCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a tweet was last seen: enough to re-fetch the page that contained it
/// when its cache entry has been consumed or has expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecacheHint {
    pub user_id: String,
    pub cursor: Option<String>,
}
