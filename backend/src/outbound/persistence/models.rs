//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate the
//! stored values and surface failures as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Author, Group, GroupId, GroupSlug, GroupSummary, ImageRef, PasswordHash, Post, PostDraft,
    PostId, PostText, User, UserId, Username,
};

use super::schema::{post_groups, posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        let username = Username::new(self.username).map_err(|err| err.to_string())?;
        let password_hash = PasswordHash::new(self.password_hash).map_err(|err| err.to_string())?;
        Ok(User::new(
            UserId::from_uuid(self.id),
            username,
            password_hash,
            self.is_staff,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub is_staff: bool,
}

/// Author columns joined onto post rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: Uuid,
    pub username: String,
}

/// Row struct for reading from the post_groups table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl GroupRow {
    pub(crate) fn into_group(self) -> Result<Group, String> {
        let slug = GroupSlug::new(self.slug).map_err(|err| err.to_string())?;
        Group::new(GroupId::new(self.id), self.title, slug, self.description)
            .map_err(|err| err.to_string())
    }
}

/// Insertable struct for creating new group records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_groups)]
pub(crate) struct NewGroupRow<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
}

/// Group columns joined onto post rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupSummaryRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
}

/// A post row joined with its author and optional group.
pub(crate) type PostJoinRow = (PostRow, AuthorRow, Option<GroupSummaryRow>);

pub(crate) fn post_from_join(row: PostJoinRow) -> Result<Post, String> {
    let (post, author, group) = row;
    let author = Author::new(
        UserId::from_uuid(author.id),
        Username::new(author.username).map_err(|err| err.to_string())?,
    );
    let group = group
        .map(|group| {
            GroupSlug::new(group.slug)
                .map(|slug| GroupSummary::new(GroupId::new(group.id), slug, group.title))
                .map_err(|err| err.to_string())
        })
        .transpose()?;
    let image = post
        .image
        .map(ImageRef::new)
        .transpose()
        .map_err(|err| err.to_string())?;
    Ok(Post::new(PostDraft {
        id: PostId::new(post.id),
        text: PostText::new(post.text).map_err(|err| err.to_string())?,
        pub_date: post.pub_date,
        image,
        author,
        group,
    }))
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub text: &'a str,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<i64>,
    pub image: Option<&'a str>,
}

/// Changeset for the editable post columns.
///
/// `None` clears a column rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostContentUpdate<'a> {
    pub text: &'a str,
    pub group_id: Option<i64>,
    pub image: Option<&'a str>,
}
