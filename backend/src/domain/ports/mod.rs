//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod feed_query;
mod group_repository;
mod login_service;
mod page_cache;
mod post_command;
mod post_repository;
mod user_repository;

pub use cache_key::PageCacheKey;
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{
    FeedQuery, FixtureFeedQuery, GroupFeedRequest, GroupFeedResponse, IndexFeedRequest,
    IndexFeedResponse, PostDetailResponse, ProfileFeedRequest, ProfileFeedResponse,
};
#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::{GroupRepository, GroupRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use page_cache::MockPageCache;
pub use page_cache::{DisabledPageCache, PageCache, PageCacheError};
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{FixturePostCommand, PostCommand, PostFlow, PostFormContext};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{FeedScope, PostRepository, PostRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
