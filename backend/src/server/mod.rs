//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use yatube::Trace;
#[cfg(debug_assertions)]
use yatube::doc::ApiDoc;
use yatube::inbound::http::configure;
use yatube::inbound::http::health::{HealthState, live, ready};
use yatube::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::weeks(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the state cannot be built or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use std::net::SocketAddr;

    fn deps() -> AppDependencies {
        let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("address");
        let config = ServerConfig::new(Key::generate(), false, SameSite::Lax, bind_addr);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("state"),
            key: config.key,
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_feeds_and_probes() {
        let deps = deps();
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;

        let index = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(index.status(), StatusCode::OK);
        assert!(index.headers().contains_key("trace-id"));

        let ready_resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_resp.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_create_redirects_to_login() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/create/").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(actix_web::http::header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/auth/login/?next=/create/")
        );
    }
}
