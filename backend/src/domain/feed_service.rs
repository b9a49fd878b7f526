//! Feed and detail read service.
//!
//! Implements [`FeedQuery`] over the repository ports: resolve the scope,
//! count it, plan the requested page and fetch only that window.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, Paginator};

use crate::domain::ports::{
    FeedQuery, FeedScope, GroupFeedRequest, GroupFeedResponse, GroupRepository,
    IndexFeedRequest, IndexFeedResponse, PostDetailResponse, PostRepository,
    ProfileFeedRequest, ProfileFeedResponse, UserRepository,
};
use crate::domain::{Error, GroupSlug, Post, PostId, Username};

/// Posts per feed page when no setting overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Read service implementing the feed driving port.
#[derive(Clone)]
pub struct FeedService<P, G, U> {
    posts: Arc<P>,
    groups: Arc<G>,
    users: Arc<U>,
    paginator: Paginator,
}

impl<P, G, U> FeedService<P, G, U> {
    /// Create a service paging with `paginator`.
    pub fn new(posts: Arc<P>, groups: Arc<G>, users: Arc<U>, paginator: Paginator) -> Self {
        Self {
            posts,
            groups,
            users,
            paginator,
        }
    }
}

impl<P, G, U> FeedService<P, G, U>
where
    P: PostRepository,
    G: GroupRepository,
    U: UserRepository,
{
    async fn page_of(&self, scope: &FeedScope, page: Option<&str>) -> Result<Page<Post>, Error> {
        let count = self.posts.count(scope).await?;
        let plan = self.paginator.plan(count, page);
        let rows = if plan.limit() == 0 {
            Vec::new()
        } else {
            self.posts
                .list_page(scope, plan.offset(), plan.limit())
                .await?
        };
        Ok(plan.into_page(rows))
    }
}

#[async_trait]
impl<P, G, U> FeedQuery for FeedService<P, G, U>
where
    P: PostRepository,
    G: GroupRepository,
    U: UserRepository,
{
    async fn index(&self, request: IndexFeedRequest) -> Result<IndexFeedResponse, Error> {
        let page_obj = self
            .page_of(&FeedScope::All, request.page.as_deref())
            .await?;
        Ok(IndexFeedResponse { page_obj })
    }

    async fn group_feed(&self, request: GroupFeedRequest) -> Result<GroupFeedResponse, Error> {
        let not_found = || Error::not_found(format!("group {} not found", request.slug));
        let slug = GroupSlug::new(request.slug.as_str()).map_err(|_| not_found())?;
        let group = self
            .groups
            .find_by_slug(&slug)
            .await?
            .ok_or_else(not_found)?;
        let page_obj = self
            .page_of(&FeedScope::Group(group.id()), request.page.as_deref())
            .await?;
        Ok(GroupFeedResponse { group, page_obj })
    }

    async fn profile_feed(
        &self,
        request: ProfileFeedRequest,
    ) -> Result<ProfileFeedResponse, Error> {
        let not_found = || Error::not_found(format!("user {} not found", request.username));
        let username = Username::new(request.username.as_str()).map_err(|_| not_found())?;
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(not_found)?;
        let page_obj = self
            .page_of(&FeedScope::Author(user.id().clone()), request.page.as_deref())
            .await?;
        Ok(ProfileFeedResponse {
            author: user.author(),
            posts_amount: page_obj.count(),
            page_obj,
        })
    }

    async fn post_detail(&self, post_id: PostId) -> Result<PostDetailResponse, Error> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))?;
        let author_posts_amount = self
            .posts
            .count(&FeedScope::Author(post.author().id().clone()))
            .await?;
        Ok(PostDetailResponse {
            post,
            author_posts_amount,
        })
    }
}

#[cfg(test)]
#[path = "feed_service_tests.rs"]
mod tests;
