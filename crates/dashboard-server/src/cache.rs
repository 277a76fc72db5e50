use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Per-ticker cache with a fixed time-to-live. Expired entries are dropped
/// when read and swept on every insert, so the map only holds live tickers.
pub struct TtlCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let key = key.to_uppercase();
        if let Some(entry) = self.entries.get(&key) {
            if now - entry.cached_at < self.ttl {
                return Some(entry.data.clone());
            }
        }
        self.entries
            .remove_if(&key, |_, entry| now - entry.cached_at >= self.ttl);
        None
    }

    pub fn insert(&self, key: &str, data: T) {
        self.insert_at(key, data, Utc::now());
    }

    fn insert_at(&self, key: &str, data: T, now: DateTime<Utc>) {
        self.entries
            .retain(|_, entry| now - entry.cached_at < self.ttl);
        self.entries.insert(
            key.to_uppercase(),
            CacheEntry {
                data,
                cached_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
