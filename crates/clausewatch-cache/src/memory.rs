//! In-process LRU cache for generated text.
//!
//! Lives for the process lifetime; entries expire only when stored with a TTL.
//! Default: 1000 entries.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::{CacheError, CachePayload, GenerationCache};

/// Cached generation with optional expiry.
struct CacheEntry {
    payload: CachePayload,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Thread-safe LRU cache. Concurrent writers to one key: last writer wins.
pub struct MemoryCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    max_size: usize,
}

impl CacheInner {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }
}

impl MemoryCache {
    /// Create a new cache with the given capacity (at least one entry).
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size.min(4096)),
                order: VecDeque::with_capacity(max_size.min(4096)),
                max_size,
            }),
        }
    }

    /// Create a cache with default settings (1000 entries).
    pub fn default_cache() -> Self {
        Self::new(1000)
    }

    /// Look up a live entry. Expired entries are dropped on access.
    pub fn lookup(&self, key: &str) -> Option<CachePayload> {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        let expired = inner.entries.get(key).map(|e| e.is_expired(now));
        match expired {
            Some(false) => {
                inner.touch(key);
                inner.entries.get(key).map(|e| e.payload.clone())
            }
            Some(true) => {
                inner.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace an entry, evicting the least recently used at capacity.
    pub fn insert(&self, key: &str, payload: CachePayload, ttl: Option<Duration>) {
        let mut inner = self.inner.lock();
        let entry = CacheEntry {
            payload,
            // A TTL past the representable range never expires.
            expires_at: ttl.and_then(|t| Instant::now().checked_add(t)),
        };

        if inner.entries.contains_key(key) {
            inner.entries.insert(key.to_string(), entry);
            inner.touch(key);
            return;
        }

        while inner.entries.len() >= inner.max_size {
            match inner.order.pop_front() {
                Some(oldest) => {
                    debug!("Evicting cache entry {}", oldest);
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(key.to_string());
        inner.entries.insert(key.to_string(), entry);
    }

    /// Number of entries in the cache (expired ones included until touched).
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::default_cache()
    }
}

#[async_trait]
impl GenerationCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CachePayload>, CacheError> {
        Ok(self.lookup(key))
    }

    async fn set(
        &self,
        key: &str,
        payload: CachePayload,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        self.insert(key, payload, ttl);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
