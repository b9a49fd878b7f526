//! HTTP inbound adapter.
//!
//! Handlers translate requests into driving-port calls and port outcomes
//! into responses. [`configure`] registers every blog route so the server
//! bootstrap and the integration tests mount the same surface.

pub mod admin;
pub mod auth;
pub mod error;
pub mod feeds;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the blog routes. Callers provide `web::Data<HttpState>` and
/// session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use yatube::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(feeds::index)
        .service(feeds::group_posts)
        .service(feeds::profile)
        .service(feeds::post_detail)
        .service(posts::create_form)
        .service(posts::create_post)
        .service(posts::edit_form)
        .service(posts::edit_post)
        .service(auth::login)
        .service(auth::logout)
        .service(admin::clear_page_cache);
}
