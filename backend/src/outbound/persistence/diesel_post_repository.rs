//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Post reads join the author (inner) and group (left) so every returned
//! post carries its references. Feed windows are fetched with
//! `LIMIT`/`OFFSET` over the `(pub_date DESC, id DESC)` ordering.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedScope, PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post, PostContent, PostId};

use super::diesel_error_mapping::{
    DieselFailure, classify, from_sql_count, map_pool_error, to_sql_bound,
};
use super::models::{
    AuthorRow, GroupSummaryRow, NewPostRow, PostContentUpdate, PostJoinRow, PostRow,
    post_from_join,
};
use super::pool::{DbPool, PoolError};
use super::schema::{post_groups, posts, users};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PostRepositoryError {
    map_pool_error(error, PostRepositoryError::connection)
}

fn failure(failure: DieselFailure) -> PostRepositoryError {
    match failure {
        DieselFailure::Connection(message) => PostRepositoryError::connection(message),
        DieselFailure::Query(message) => PostRepositoryError::query(message),
        DieselFailure::UniqueViolation => PostRepositoryError::query("duplicate post"),
    }
}

fn diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    failure(classify(error))
}

fn to_posts(rows: Vec<PostJoinRow>) -> Result<Vec<Post>, PostRepositoryError> {
    rows.into_iter()
        .map(post_from_join)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PostRepositoryError::query)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<PostJoinRow> = posts::table
            .inner_join(users::table)
            .left_join(post_groups::table)
            .filter(posts::id.eq(id.get()))
            .select((
                PostRow::as_select(),
                AuthorRow::as_select(),
                Option::<GroupSummaryRow>::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(post_from_join)
            .transpose()
            .map_err(PostRepositoryError::query)
    }

    async fn count(&self, scope: &FeedScope) -> Result<usize, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = posts::table.into_boxed();
        query = match scope {
            FeedScope::All => query,
            FeedScope::Group(group_id) => query.filter(posts::group_id.eq(group_id.get())),
            FeedScope::Author(author_id) => query.filter(posts::author_id.eq(*author_id.as_uuid())),
        };
        let total: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        from_sql_count(total).map_err(failure)
    }

    async fn list_page(
        &self,
        scope: &FeedScope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let offset = to_sql_bound(offset).map_err(failure)?;
        let limit = to_sql_bound(limit).map_err(failure)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = posts::table
            .inner_join(users::table)
            .left_join(post_groups::table)
            .select((
                PostRow::as_select(),
                AuthorRow::as_select(),
                Option::<GroupSummaryRow>::as_select(),
            ))
            .into_boxed();
        query = match scope {
            FeedScope::All => query,
            FeedScope::Group(group_id) => query.filter(posts::group_id.eq(group_id.get())),
            FeedScope::Author(author_id) => query.filter(posts::author_id.eq(*author_id.as_uuid())),
        };
        let rows: Vec<PostJoinRow> = query
            .order((posts::pub_date.desc(), posts::id.desc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_posts(rows)
    }

    async fn insert(&self, post: &NewPost) -> Result<PostId, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewPostRow {
            text: post.content.text.as_str(),
            pub_date: post.pub_date,
            author_id: *post.author_id.as_uuid(),
            group_id: post.content.group.map(|group| group.get()),
            image: post.content.image.as_ref().map(|image| image.as_str()),
        };
        let id: i64 = diesel::insert_into(posts::table)
            .values(&row)
            .returning(posts::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(PostId::new(id))
    }

    async fn update(&self, id: PostId, content: &PostContent) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = PostContentUpdate {
            text: content.text.as_str(),
            group_id: content.group.map(|group| group.get()),
            image: content.image.as_ref().map(|image| image.as_str()),
        };
        let updated = diesel::update(posts::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(PostRepositoryError::query(format!("post {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; queries run against PostgreSQL only.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DieselFailure::Connection("gone"), true)]
    #[case(DieselFailure::Query("bad"), false)]
    #[case(DieselFailure::UniqueViolation, false)]
    fn failures_map_to_port_errors(#[case] input: DieselFailure, #[case] is_connection: bool) {
        let mapped = failure(input);
        assert_eq!(
            matches!(mapped, PostRepositoryError::Connection { .. }),
            is_connection
        );
    }
}
