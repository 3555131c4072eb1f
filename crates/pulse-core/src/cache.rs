//! Short-lived response cache.
//!
//! Answers are stored under `intent:name` keys with a fixed time-to-live.
//! Expired entries are removed lazily when read; there is no background sweep
//! and no capacity bound.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Default time-to-live for cached answers
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Source of the current time for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory TTL cache shared by all requests
pub struct ResponseCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create a cache backed by the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with a custom clock
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Build the cache key for a question
    pub fn key(intent: impl std::fmt::Display, name: &str) -> String {
        format!("{}:{}", intent, name.to_lowercase())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a live value, dropping it if it has expired
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => now > entry.expires_at,
        };

        if expired {
            entries.remove(key);
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value, replacing any previous entry and restarting its TTL
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let entry = CacheEntry {
            value: value.into(),
            expires_at: self.clock.now() + self.ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    /// Number of stored entries, including ones not yet lazily expired
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
