//! Driving port for the read-only feed and detail views.
//!
//! Responses are the render contexts handed to the presentation layer; field
//! names follow the template variables (`page_obj`, `posts_amount`, ...).

use async_trait::async_trait;
use pagination::{Page, Paginator};
use serde::Serialize;

use crate::domain::{Author, DEFAULT_PAGE_SIZE, Error, Group, Post, PostId};

/// Request for the all-posts feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexFeedRequest {
    /// Raw `page` query argument.
    pub page: Option<String>,
}

/// Request for one group's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFeedRequest {
    /// Group slug from the path.
    pub slug: String,
    /// Raw `page` query argument.
    pub page: Option<String>,
}

/// Request for one author's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFeedRequest {
    /// Username from the path.
    pub username: String,
    /// Raw `page` query argument.
    pub page: Option<String>,
}

/// Context for the all-posts feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexFeedResponse {
    pub page_obj: Page<Post>,
}

/// Context for a group feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFeedResponse {
    pub group: Group,
    pub page_obj: Page<Post>,
}

/// Context for an author's profile feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileFeedResponse {
    pub author: Author,
    pub posts_amount: usize,
    pub page_obj: Page<Post>,
}

/// Context for a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub author_posts_amount: usize,
}

/// Driving port for feed reads.
///
/// Unknown slugs, usernames and post ids surface as `not_found` errors.
/// Page arguments never fail: see [`pagination::PageRequest`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// All posts, newest first.
    async fn index(&self, request: IndexFeedRequest) -> Result<IndexFeedResponse, Error>;

    /// Posts of one group, newest first.
    async fn group_feed(&self, request: GroupFeedRequest) -> Result<GroupFeedResponse, Error>;

    /// Posts of one author, newest first, with the author's post count.
    async fn profile_feed(&self, request: ProfileFeedRequest)
    -> Result<ProfileFeedResponse, Error>;

    /// One post with its author's post count.
    async fn post_detail(&self, post_id: PostId) -> Result<PostDetailResponse, Error>;
}

/// Feed query over an empty blog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedQuery;

#[async_trait]
impl FeedQuery for FixtureFeedQuery {
    async fn index(&self, request: IndexFeedRequest) -> Result<IndexFeedResponse, Error> {
        let paginator = Paginator::new(DEFAULT_PAGE_SIZE)
            .map_err(|err| Error::internal(format!("fixture paginator: {err}")))?;
        Ok(IndexFeedResponse {
            page_obj: paginator.page(Vec::new(), request.page.as_deref()),
        })
    }

    async fn group_feed(&self, request: GroupFeedRequest) -> Result<GroupFeedResponse, Error> {
        Err(Error::not_found(format!("group {} not found", request.slug)))
    }

    async fn profile_feed(
        &self,
        request: ProfileFeedRequest,
    ) -> Result<ProfileFeedResponse, Error> {
        Err(Error::not_found(format!("user {} not found", request.username)))
    }

    async fn post_detail(&self, post_id: PostId) -> Result<PostDetailResponse, Error> {
        Err(Error::not_found(format!("post {post_id} not found")))
    }
}
