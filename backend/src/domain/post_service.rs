//! Post create and edit service.
//!
//! Implements [`PostCommand`]. The author gate runs before any validation or
//! persistence: anonymous callers get [`PostFlow::LoginRequired`] and
//! non-authors get [`PostFlow::ToDetail`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    GroupRepository, PostCommand, PostFlow, PostFormContext, PostRepository,
};
use crate::domain::{Error, Group, NewPost, Post, PostForm, PostFormData, PostId, Principal};

/// Write service implementing the post command driving port.
#[derive(Clone)]
pub struct PostService<P, G> {
    posts: Arc<P>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P, G> PostService<P, G> {
    /// Create a service stamping new posts with `clock`.
    pub fn new(posts: Arc<P>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            groups,
            clock,
        }
    }
}

impl<P, G> PostService<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    async fn resolve_group(&self, data: &PostFormData) -> Result<Option<Group>, Error> {
        match data.requested_group() {
            Some(id) => self.groups.find_by_id(id).await.map_err(Error::from),
            None => Ok(None),
        }
    }

    async fn load_post(&self, post_id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))
    }

    /// Load the post and apply the author gate.
    ///
    /// `Ok(Err(flow))` is the redirect to show instead of the form.
    async fn authorised_post(
        &self,
        principal: Option<&Principal>,
        post_id: PostId,
    ) -> Result<Result<Post, PostFlow>, Error> {
        let Some(principal) = principal else {
            return Ok(Err(PostFlow::LoginRequired));
        };
        let post = self.load_post(post_id).await?;
        if principal.is_author(post.author()) {
            Ok(Ok(post))
        } else {
            Ok(Err(PostFlow::ToDetail(post_id)))
        }
    }
}

fn show_form(form: PostForm, is_edit: bool) -> PostFlow {
    PostFlow::ShowForm(PostFormContext { form, is_edit })
}

#[async_trait]
impl<P, G> PostCommand for PostService<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    async fn create_form(&self, principal: Option<Principal>) -> Result<PostFlow, Error> {
        Ok(match principal {
            Some(_) => show_form(PostForm::empty(), false),
            None => PostFlow::LoginRequired,
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
        let group = self.resolve_group(&data).await?;
        let content = match data.validate(group.as_ref()) {
            Ok(content) => content,
            Err(errors) => return Ok(show_form(PostForm::rejected(data, errors), false)),
        };
        let new_post = NewPost {
            author_id: principal.id().clone(),
            pub_date: self.clock.utc(),
            content,
        };
        self.posts.insert(&new_post).await?;
        Ok(PostFlow::ToProfile(principal.username().clone()))
    }

    async fn edit_form(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
    ) -> Result<PostFlow, Error> {
        Ok(match self.authorised_post(principal.as_ref(), post_id).await? {
            Ok(post) => show_form(PostForm::for_post(&post), true),
            Err(flow) => flow,
        })
    }

    async fn edit(
        &self,
        principal: Option<Principal>,
        post_id: PostId,
        data: PostFormData,
    ) -> Result<PostFlow, Error> {
        if let Err(flow) = self.authorised_post(principal.as_ref(), post_id).await? {
            return Ok(flow);
        }
        let group = self.resolve_group(&data).await?;
        let content = match data.validate(group.as_ref()) {
            Ok(content) => content,
            Err(errors) => return Ok(show_form(PostForm::rejected(data, errors), true)),
        };
        self.posts.update(post_id, &content).await?;
        Ok(PostFlow::ToDetail(post_id))
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
