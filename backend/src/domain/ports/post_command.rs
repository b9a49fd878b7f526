//! Driving port for creating and editing posts.
//!
//! Every operation takes the request principal explicitly. Outcomes that a
//! browser sees as redirects are returned as [`PostFlow`] variants so the
//! inbound adapter decides how to express them.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, PostForm, PostFormData, PostId, Principal, Username};

/// Form context returned when the form must be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFormContext {
    pub form: PostForm,
    pub is_edit: bool,
}

/// Outcome of a create or edit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFlow {
    /// Show the form, blank, pre-filled or with validation errors.
    ShowForm(PostFormContext),
    /// No principal; the caller must log in first.
    LoginRequired,
    /// Post created; continue to the author's profile.
    ToProfile(Username),
    /// Continue to the post's detail page.
    ToDetail(PostId),
}

/// Driving port for post writes.
///
/// Edit operations answer a non-author with [`PostFlow::ToDetail`] before
/// looking at submitted data. A missing post is a `not_found` error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Blank create form.
    async fn create_form(&self, principal: Option<Principal>) -> Result<PostFlow, Error>;

    /// Validate and store a new post authored by `principal`.
    async fn create(
        &self,
        principal: Option<Principal>,
        data: PostFormData,
    ) -> Result<PostFlow, Error>;

    /// Edit form pre-filled with the stored post.
    async fn edit_form(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
    ) -> Result<PostFlow, Error>;

    /// Validate and apply an edit.
    async fn edit(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
        data: PostFormData,
    ) -> Result<PostFlow, Error>;
}

/// Post command that validates submissions but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostCommand;

#[async_trait]
impl PostCommand for FixturePostCommand {
    async fn create_form(&self, principal: Option<Principal>) -> Result<PostFlow, Error> {
        Ok(match principal {
            None => PostFlow::LoginRequired,
            Some(_) => PostFlow::ShowForm(PostFormContext {
                form: PostForm::empty(),
                is_edit: false,
            }),
        })
    }

    async fn create(
        &self,
        principal: Option<Principal>,
        data: PostFormData,
    ) -> Result<PostFlow, Error> {
        let Some(principal) = principal else {
            return Ok(PostFlow::LoginRequired);
        };
        Ok(match data.validate(None) {
            Ok(_) => PostFlow::ToProfile(principal.username().clone()),
            Err(errors) => PostFlow::ShowForm(PostFormContext {
                form: PostForm::rejected(data, errors),
                is_edit: false,
            }),
        })
    }

    async fn edit_form(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
    ) -> Result<PostFlow, Error> {
        match principal {
            None => Ok(PostFlow::LoginRequired),
            Some(_) => Err(Error::not_found(format!("post {post_id} not found"))),
        }
    }

    async fn edit(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
        _data: PostFormData,
    ) -> Result<PostFlow, Error> {
        self.edit_form(principal, post_id).await
    }
}
