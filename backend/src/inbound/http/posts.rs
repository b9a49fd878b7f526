//! Post create and edit handlers.
//!
//! ```text
//! GET|POST /create/
//! GET|POST /posts/{post_id}/edit/
//! ```
//!
//! Bodies may be JSON or `application/x-www-form-urlencoded`. Redirect
//! outcomes are answered with `302 Found`; form re-renders with `200` and the
//! form context as JSON.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use url::form_urlencoded;

use crate::domain::ports::PostFlow;
use crate::domain::PostFormData;
use crate::inbound::http::ApiResult;
use crate::inbound::http::feeds::parse_post_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login page anonymous writers are sent to.
pub const LOGIN_URL: &str = "/auth/login/";

/// Group selection as submitted: a JSON number or a form string.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum GroupField {
    Id(i64),
    Raw(String),
}

/// Post form body. Unknown fields such as `author` are ignored.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct PostFormPayload {
    /// Post text; a missing field counts as empty.
    #[serde(default)]
    pub text: String,
    /// Group id; empty or null means no group.
    #[serde(default)]
    pub group: Option<GroupField>,
    /// Image reference; empty or null means no image.
    #[serde(default)]
    pub image: Option<String>,
}

impl From<PostFormPayload> for PostFormData {
    fn from(value: PostFormPayload) -> Self {
        let group = value.group.map(|group| match group {
            GroupField::Id(id) => id.to_string(),
            GroupField::Raw(raw) => raw,
        });
        PostFormData::new(value.text, group, value.image)
    }
}

type FormBody = web::Either<web::Json<PostFormPayload>, web::Form<PostFormPayload>>;

fn form_data(body: FormBody) -> PostFormData {
    match body {
        web::Either::Left(json) => json.into_inner().into(),
        web::Either::Right(form) => form.into_inner().into(),
    }
}

fn found(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Login URL returning to `path` afterwards.
///
/// Each segment is percent-encoded; the separating slashes stay readable.
fn login_redirect(path: &str) -> String {
    let next = path
        .split('/')
        .map(|segment| form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");
    format!("{LOGIN_URL}?next={next}")
}

/// Express a [`PostFlow`] as an HTTP response.
fn respond(req: &HttpRequest, flow: PostFlow) -> HttpResponse {
    match flow {
        PostFlow::ShowForm(context) => HttpResponse::Ok().json(context),
        PostFlow::LoginRequired => found(login_redirect(req.path())),
        PostFlow::ToProfile(username) => found(format!("/profile/{username}/")),
        PostFlow::ToDetail(post_id) => found(format!("/posts/{post_id}/")),
    }
}

/// Blank post form.
#[utoipa::path(
    get,
    path = "/create/",
    responses(
        (status = 200, description = "Empty form context"),
        (status = 302, description = "Login required")
    ),
    tags = ["posts"],
    operation_id = "createForm"
)]
#[get("/create/")]
pub async fn create_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let principal = session.principal(state.login.as_ref()).await?;
    let flow = state.posts.create_form(principal).await?;
    Ok(respond(&req, flow))
}

/// Create a post authored by the session user.
#[utoipa::path(
    post,
    path = "/create/",
    request_body = PostFormPayload,
    responses(
        (status = 200, description = "Form context with field errors"),
        (status = 302, description = "Created, or login required"),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/create/")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    body: FormBody,
) -> ApiResult<HttpResponse> {
    let principal = session.principal(state.login.as_ref()).await?;
    let flow = state.posts.create(principal, form_data(body)).await?;
    Ok(respond(&req, flow))
}

/// Edit form pre-filled with the stored post.
#[utoipa::path(
    get,
    path = "/posts/{post_id}/edit/",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Bound form context"),
        (status = 302, description = "Login required, or not the author"),
        (status = 404, description = "Unknown post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "editForm"
)]
#[get("/posts/{post_id}/edit/")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let principal = session.principal(state.login.as_ref()).await?;
    let flow = state.posts.edit_form(principal, post_id).await?;
    Ok(respond(&req, flow))
}

/// Apply an edit submitted by the post's author.
#[utoipa::path(
    post,
    path = "/posts/{post_id}/edit/",
    params(("post_id" = i64, Path, description = "Post identifier")),
    request_body = PostFormPayload,
    responses(
        (status = 200, description = "Form context with field errors"),
        (status = 302, description = "Saved, login required, or not the author"),
        (status = 404, description = "Unknown post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "editPost"
)]
#[post("/posts/{post_id}/edit/")]
pub async fn edit_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
    body: FormBody,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let principal = session.principal(state.login.as_ref()).await?;
    let flow = state.posts.edit(principal, post_id, form_data(body)).await?;
    Ok(respond(&req, flow))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
