//! Port for post storage and the feed queries built on it.

use async_trait::async_trait;

use crate::domain::{GroupId, NewPost, Post, PostContent, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } as service_unavailable => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } as internal => "post repository query failed: {message}",
    }
}

/// Which posts a feed covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post.
    All,
    /// Posts in one group.
    Group(GroupId),
    /// Posts written by one user.
    Author(UserId),
}

/// Port for reading and writing posts.
///
/// Listings are ordered newest first by `pub_date`, with the higher id first
/// when timestamps tie.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post with its author and group.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Number of posts in `scope`.
    async fn count(&self, scope: &FeedScope) -> Result<usize, PostRepositoryError>;

    /// Posts in `scope`, skipping `offset` and returning at most `limit`.
    async fn list_page(
        &self,
        scope: &FeedScope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>, PostRepositoryError>;

    /// Store a new post and return its identifier.
    async fn insert(&self, post: &NewPost) -> Result<PostId, PostRepositoryError>;

    /// Replace the editable fields of an existing post.
    async fn update(&self, id: PostId, content: &PostContent) -> Result<(), PostRepositoryError>;

    /// Remove a post. Returns `false` when it did not exist.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_message() {
        let err = PostRepositoryError::connection("pool closed");
        assert_eq!(
            err.to_string(),
            "post repository connection failed: pool closed"
        );
    }
}
