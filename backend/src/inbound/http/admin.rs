//! Operator endpoints.
//!
//! ```text
//! POST /admin/cache/clear/
//! ```

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Drop every cached listing page. Staff only.
#[utoipa::path(
    post,
    path = "/admin/cache/clear/",
    responses(
        (status = 204, description = "Cache cleared"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Staff only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "clearPageCache"
)]
#[post("/admin/cache/clear/")]
pub async fn clear_page_cache(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session
        .principal(state.login.as_ref())
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    if !principal.is_staff() {
        return Err(Error::forbidden("staff only"));
    }
    state.page_cache.clear().await?;
    info!(username = %principal.username(), "page cache cleared");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockLoginService, MockPageCache, PageCacheError};
    use crate::domain::{Principal, Username};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{fixture_ports, session_cookie, test_session_middleware};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use std::sync::Arc;
    use std::time::Duration;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn state(is_staff: bool, clears: usize, outcome: Result<(), PageCacheError>) -> HttpState {
        let mut login = MockLoginService::new();
        login.expect_resolve().returning(move |id| {
            Ok(Some(Principal::new(
                id.clone(),
                Username::new("leo").expect("username"),
                is_staff,
            )))
        });
        let mut cache = MockPageCache::new();
        cache
            .expect_clear()
            .times(clears)
            .returning(move || outcome.clone());
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(login),
                page_cache: Arc::new(cache),
                ..fixture_ports()
            },
            Duration::from_secs(20),
        )
    }

    async fn clear_as(state: HttpState, logged_in: bool) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: Session| async move {
                        session.insert("user_id", USER_ID).expect("set user id");
                        HttpResponse::Ok()
                    }),
                )
                .service(clear_page_cache),
        )
        .await;
        let mut req = test::TestRequest::post().uri("/admin/cache/clear/");
        if logged_in {
            let res =
                test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
                    .await;
            req = req.cookie(session_cookie(&res));
        }
        test::call_service(&app, req.to_request()).await.status()
    }

    #[rstest]
    #[case(false, false, 0, StatusCode::UNAUTHORIZED)]
    #[case(true, false, 0, StatusCode::FORBIDDEN)]
    #[case(true, true, 1, StatusCode::NO_CONTENT)]
    #[actix_web::test]
    async fn only_staff_may_clear(
        #[case] logged_in: bool,
        #[case] is_staff: bool,
        #[case] clears: usize,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(clear_as(state(is_staff, clears, Ok(())), logged_in).await, expected);
    }

    #[actix_web::test]
    async fn cache_backend_failure_is_service_unavailable() {
        let failing = state(true, 1, Err(PageCacheError::backend("lock poisoned")));
        assert_eq!(
            clear_as(failing, true).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
