//! Shared harness for the end-to-end HTTP scenarios.
//!
//! Each scenario owns an in-memory blog, a clock that only moves when told
//! to, and an app wired like the server: session middleware, the `Trace`
//! middleware and every blog route.

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use mockable::Clock;
use pagination::Paginator;
use serde_json::{Value, json};

use yatube::Trace;
use yatube::domain::ports::{GroupRepository, PostRepository, UserRepository};
use yatube::domain::{
    FeedService, Group, GroupId, GroupSlug, NewGroup, NewPost, PasswordLoginService, PostContent,
    PostId, PostService, PostText, User,
};
use yatube::inbound::http::configure;
use yatube::inbound::http::state::{HttpState, HttpStatePorts};
use yatube::inbound::http::test_utils::{session_cookie, test_session_middleware};
use yatube::outbound::cache::InMemoryPageCache;
use yatube::outbound::memory::InMemoryBlogStore;
use yatube::test_support::{MutableClock, user_with_password};

/// Password shared by every seeded account.
pub const PASSWORD: &str = "correct horse";

/// Lifetime of cached listing pages.
pub const CACHE_TTL: Duration = Duration::from_secs(20);

/// Seeded blog plus the collaborators scenarios inspect directly.
pub struct Blog {
    pub store: Arc<InMemoryBlogStore>,
    pub clock: Arc<MutableClock>,
    pub state: web::Data<HttpState>,
    pub leo: User,
    pub other: User,
    pub cats: Group,
}

impl Blog {
    /// Seed users `leo`, `other` and staff member `admin` plus group `cats`,
    /// paging feeds `page_size` posts at a time.
    pub async fn new(page_size: usize) -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid start timestamp");
        let clock = Arc::new(MutableClock::new(start));

        let leo = user_with_password("leo", PASSWORD, false);
        let other = user_with_password("other", PASSWORD, false);
        let staff = user_with_password("admin", PASSWORD, true);
        for user in [&leo, &other, &staff] {
            UserRepository::insert(store.as_ref(), user)
                .await
                .expect("seed user");
        }
        let cats = GroupRepository::insert(
            store.as_ref(),
            &NewGroup::new("Cats", GroupSlug::new("cats").expect("slug"), "About cats")
                .expect("group"),
        )
        .await
        .expect("seed group");

        let paginator = Paginator::new(page_size).expect("page size");
        let ports = HttpStatePorts {
            login: Arc::new(PasswordLoginService::new(store.clone())),
            feeds: Arc::new(FeedService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                paginator,
            )),
            posts: Arc::new(PostService::new(
                store.clone(),
                store.clone(),
                clock.clone(),
            )),
            page_cache: Arc::new(InMemoryPageCache::new(clock.clone())),
        };
        let state = web::Data::new(HttpState::new(ports, CACHE_TTL));

        Self {
            store,
            clock,
            state,
            leo,
            other,
            cats,
        }
    }

    /// Store a post by `author`, one minute after the previous one.
    pub async fn post(&self, author: &User, text: &str, group: Option<GroupId>) -> PostId {
        self.clock.advance_seconds(60);
        PostRepository::insert(
            self.store.as_ref(),
            &NewPost {
                author_id: author.id().clone(),
                pub_date: self.clock.utc(),
                content: PostContent {
                    text: PostText::new(text).expect("post text"),
                    group,
                    image: None,
                },
            },
        )
        .await
        .expect("seed post")
    }

    /// Build the app under test.
    pub async fn app(
        &self,
    ) -> impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(test_session_middleware())
                .wrap(Trace)
                .configure(configure),
        )
        .await
    }
}

/// Log `username` in and return the session cookie.
pub async fn login<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(json!({ "username": username, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login as {username} failed");
    session_cookie(&res)
}

/// GET `uri` and return the raw body bytes.
pub async fn get_bytes<S, B>(app: &S, uri: &str) -> Vec<u8>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    assert!(res.status().is_success(), "GET {uri} returned {}", res.status());
    test::read_body(res).await.to_vec()
}

/// GET `uri` and parse the body as JSON.
pub async fn get_json<S, B>(app: &S, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    serde_json::from_slice(&get_bytes(app, uri).await).expect("JSON body")
}

/// `Location` header of a response.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
