//! Feed and post detail handlers.
//!
//! ```text
//! GET /                      all posts
//! GET /group/{slug}/         one group's posts
//! GET /profile/{username}/   one author's posts
//! GET /posts/{post_id}/      one post
//! ```
//!
//! Listing responses are served through the page cache, keyed by path and
//! query string. Only successful renders are stored; a cache failure is
//! logged and the page is rendered uncached.

use std::future::Future;

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::{
    GroupFeedRequest, IndexFeedRequest, PageCacheKey, PostDetailResponse, ProfileFeedRequest,
};
use crate::domain::{Error, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query string accepted by the feeds.
///
/// `page` is kept raw; garbage resolves to the first page.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Requested page number.
    pub page: Option<String>,
}

async fn cached_page<T, F>(state: &HttpState, req: &HttpRequest, render: F) -> ApiResult<HttpResponse>
where
    T: Serialize,
    F: Future<Output = Result<T, Error>>,
{
    let key = PageCacheKey::for_request(req.path(), req.query_string());
    match state.page_cache.get(&key).await {
        Ok(Some(body)) => return Ok(json_body(body)),
        Ok(None) => {}
        Err(error) => warn!(%error, key = %key, "page cache read failed"),
    }

    let context = render.await?;
    let body = serde_json::to_vec(&context)
        .map_err(|err| Error::internal(format!("failed to encode page: {err}")))?;
    if let Err(error) = state
        .page_cache
        .set(&key, body.clone(), state.cache_ttl)
        .await
    {
        warn!(%error, key = %key, "page cache write failed");
    }
    Ok(json_body(body))
}

fn json_body(body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// All posts, newest first.
#[utoipa::path(
    get,
    path = "/",
    params(PageQuery),
    responses(
        (status = 200, description = "Feed page context"),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "index",
    security([])
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = query.into_inner().page;
    cached_page(&state, &req, state.feeds.index(IndexFeedRequest { page })).await
}

/// Posts of one group, newest first.
#[utoipa::path(
    get,
    path = "/group/{slug}/",
    params(("slug" = String, Path, description = "Group slug"), PageQuery),
    responses(
        (status = 200, description = "Group feed page context"),
        (status = 404, description = "Unknown group", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "groupPosts",
    security([])
)]
#[get("/group/{slug}/")]
pub async fn group_posts(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = GroupFeedRequest {
        slug: path.into_inner(),
        page: query.into_inner().page,
    };
    cached_page(&state, &req, state.feeds.group_feed(request)).await
}

/// Posts of one author, newest first, with the author's post count.
#[utoipa::path(
    get,
    path = "/profile/{username}/",
    params(("username" = String, Path, description = "Author username"), PageQuery),
    responses(
        (status = 200, description = "Profile page context"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "profile",
    security([])
)]
#[get("/profile/{username}/")]
pub async fn profile(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = ProfileFeedRequest {
        username: path.into_inner(),
        page: query.into_inner().page,
    };
    cached_page(&state, &req, state.feeds.profile_feed(request)).await
}

/// Parse a post id path segment; anything but a positive integer is a 404.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("post {raw} not found")))
}

/// One post with its author's post count.
#[utoipa::path(
    get,
    path = "/posts/{post_id}/",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post detail context"),
        (status = 404, description = "Unknown post", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "postDetail",
    security([])
)]
#[get("/posts/{post_id}/")]
pub async fn post_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostDetailResponse>> {
    let post_id = parse_post_id(&path)?;
    Ok(web::Json(state.feeds.post_detail(post_id).await?))
}

#[cfg(test)]
#[path = "feeds_tests.rs"]
mod tests;
