//! In-process page cache.
//!
//! Entries live in a mutex-guarded map and carry an absolute expiry taken
//! from the injected [`Clock`]. Expired entries read as misses and are
//! evicted on access; `set` also sweeps expired entries so the map does not
//! grow without bound between clears.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{PageCache, PageCacheError, PageCacheKey};

#[derive(Debug, Clone)]
struct Entry {
    body: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// Page cache held in process memory and shared by all workers.
pub struct InMemoryPageCache {
    entries: Mutex<HashMap<PageCacheKey, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPageCache {
    /// Create an empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PageCacheKey, Entry>>, PageCacheError> {
        self.entries
            .lock()
            .map_err(|_| PageCacheError::backend("page cache lock poisoned"))
    }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn get(&self, key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.body.clone())),
            Some(_) => {
                entries.remove(key);
                debug!(key = %key, "page cache entry expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &PageCacheKey,
        body: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), PageCacheError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|err| PageCacheError::backend(format!("invalid ttl: {err}")))?;
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.clone(),
            Entry {
                body,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), PageCacheError> {
        let mut entries = self.lock()?;
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "page cache cleared");
        Ok(())
    }
}
