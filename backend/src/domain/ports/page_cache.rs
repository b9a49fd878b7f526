//! Port interface for caching rendered listing pages.
use std::time::Duration;

use async_trait::async_trait;

use super::{PageCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the page cache adapter.
    pub enum PageCacheError {
        /// Cache backend is unavailable or its state is unusable.
        Backend { message: String } as service_unavailable => "page cache backend failure: {message}",
    }
}

/// Store of rendered page bodies with a per-entry time to live.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Read a live entry; expired entries read as `None`.
    async fn get(&self, key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError>;

    /// Store `body` under `key` for `ttl`, replacing any previous entry.
    async fn set(
        &self,
        key: &PageCacheKey,
        body: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), PageCacheError>;

    /// Drop every entry.
    async fn clear(&self) -> Result<(), PageCacheError>;
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledPageCache;

#[async_trait]
impl PageCache for DisabledPageCache {
    async fn get(&self, _key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &PageCacheKey,
        _body: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), PageCacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), PageCacheError> {
        Ok(())
    }
}
