//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use yatube::domain::{DEFAULT_PAGE_SIZE, User};
use yatube::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) page_size: usize,
    pub(crate) cache_ttl: Duration,
    pub(crate) seed_users: Vec<User>,
}

impl ServerConfig {
    /// Construct a server configuration with in-memory storage, the default
    /// page size and a 20 second page cache.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: Duration::from_secs(20),
            seed_users: Vec::new(),
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the number of posts per feed page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the lifetime of cached listing pages.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Add an account to the in-memory store. Ignored with a database pool.
    #[must_use]
    pub fn with_seed_user(mut self, user: User) -> Self {
        self.seed_users.push(user);
        self
    }
}
