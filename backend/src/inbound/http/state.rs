//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{FeedQuery, LoginService, PageCache, PostCommand};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub feeds: Arc<dyn FeedQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub page_cache: Arc<dyn PageCache>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub feeds: Arc<dyn FeedQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub page_cache: Arc<dyn PageCache>,
    /// Lifetime of cached listing pages.
    pub cache_ttl: Duration,
}

impl HttpState {
    /// Construct state from a ports bundle and the listing cache lifetime.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use yatube::domain::ports::{
    ///     DisabledPageCache, FixtureFeedQuery, FixtureLoginService, FixturePostCommand,
    /// };
    /// use yatube::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(FixtureLoginService),
    ///         feeds: Arc::new(FixtureFeedQuery),
    ///         posts: Arc::new(FixturePostCommand),
    ///         page_cache: Arc::new(DisabledPageCache),
    ///     },
    ///     Duration::from_secs(20),
    /// );
    /// assert_eq!(state.cache_ttl, Duration::from_secs(20));
    /// ```
    pub fn new(ports: HttpStatePorts, cache_ttl: Duration) -> Self {
        let HttpStatePorts {
            login,
            feeds,
            posts,
            page_cache,
        } = ports;
        Self {
            login,
            feeds,
            posts,
            page_cache,
            cache_ttl,
        }
    }
}
