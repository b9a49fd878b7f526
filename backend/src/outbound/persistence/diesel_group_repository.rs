//! PostgreSQL-backed `GroupRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GroupRepository, GroupRepositoryError};
use crate::domain::{Group, GroupId, GroupSlug, NewGroup};

use super::diesel_error_mapping::{DieselFailure, classify, map_pool_error};
use super::models::{GroupRow, NewGroupRow};
use super::pool::{DbPool, PoolError};
use super::schema::post_groups;

/// Diesel-backed implementation of the group repository port.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> GroupRepositoryError {
    map_pool_error(error, GroupRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error, slug: &str) -> GroupRepositoryError {
    match classify(error) {
        DieselFailure::UniqueViolation => GroupRepositoryError::duplicate_slug(slug),
        DieselFailure::Connection(message) => GroupRepositoryError::connection(message),
        DieselFailure::Query(message) => GroupRepositoryError::query(message),
    }
}

fn to_group(row: GroupRow) -> Result<Group, GroupRepositoryError> {
    row.into_group().map_err(GroupRepositoryError::query)
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = post_groups::table
            .find(id.get())
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(err, ""))?;
        row.map(to_group).transpose()
    }

    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = post_groups::table
            .filter(post_groups::slug.eq(slug.as_str()))
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(err, slug.as_str()))?;
        row.map(to_group).transpose()
    }

    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewGroupRow {
            title: group.title(),
            slug: group.slug().as_str(),
            description: group.description(),
        };
        let id: i64 = diesel::insert_into(post_groups::table)
            .values(&row)
            .returning(post_groups::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(err, group.slug().as_str()))?;
        Ok(group.clone().into_group(GroupId::new(id)))
    }

    async fn delete(&self, id: GroupId) -> Result<bool, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // `posts.group_id` is set to NULL by the foreign key.
        let deleted = diesel::delete(post_groups::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(err, ""))?;
        Ok(deleted > 0)
    }
}
