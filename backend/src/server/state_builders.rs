//! Builders wiring repositories into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use pagination::Paginator;

use yatube::domain::ports::{GroupRepository, PostRepository, UserRepository};
use yatube::domain::{FeedService, PasswordLoginService, PostService};
use yatube::inbound::http::state::{HttpState, HttpStatePorts};
use yatube::outbound::cache::InMemoryPageCache;
use yatube::outbound::memory::InMemoryBlogStore;
use yatube::outbound::persistence::{
    DieselGroupRepository, DieselPostRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the driving ports over one set of repositories.
///
/// # Errors
/// Returns [`std::io::Error`] when `page_size` is zero.
fn build_ports<U, G, P>(
    users: Arc<U>,
    groups: Arc<G>,
    posts: Arc<P>,
    page_size: usize,
    clock: Arc<dyn Clock>,
) -> std::io::Result<HttpStatePorts>
where
    U: UserRepository + 'static,
    G: GroupRepository + 'static,
    P: PostRepository + 'static,
{
    let paginator = Paginator::new(page_size)
        .map_err(|err| std::io::Error::other(format!("invalid page size {page_size}: {err}")))?;

    Ok(HttpStatePorts {
        login: Arc::new(PasswordLoginService::new(users.clone())),
        feeds: Arc::new(FeedService::new(
            posts.clone(),
            groups.clone(),
            users,
            paginator,
        )),
        posts: Arc::new(PostService::new(posts, groups, clock.clone())),
        page_cache: Arc::new(InMemoryPageCache::new(clock)),
    })
}

/// Build the shared HTTP state, backed by PostgreSQL when a pool is
/// configured and by process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselGroupRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
            config.page_size,
            clock,
        )?,
        None => {
            let store = Arc::new(
                InMemoryBlogStore::with_users(config.seed_users.iter().cloned())
                    .map_err(std::io::Error::other)?,
            );
            build_ports(store.clone(), store.clone(), store, config.page_size, clock)?
        }
    };
    Ok(web::Data::new(HttpState::new(ports, config.cache_ttl)))
}
