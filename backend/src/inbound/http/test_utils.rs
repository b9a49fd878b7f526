//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    DisabledPageCache, FixtureFeedQuery, FixtureLoginService, FixturePostCommand,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation, names the cookie `session` and
/// disables the `Secure` flag for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
///
/// # Panics
/// Panics when the response did not set a `session` cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Ports backed by the fixture implementations.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        feeds: Arc::new(FixtureFeedQuery),
        posts: Arc::new(FixturePostCommand),
        page_cache: Arc::new(DisabledPageCache),
    }
}

/// Handler state backed by the fixture implementations.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports(), Duration::from_secs(20))
}
