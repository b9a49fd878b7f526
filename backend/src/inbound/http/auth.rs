//! Login and logout handlers.
//!
//! ```text
//! POST /auth/login/  {"username":"leo","password":"secret"}
//! POST /auth/logout/
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Body returned after a successful login.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub username: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_user(principal.id())?;
    info!(username = %principal.username(), "user logged in");
    Ok(web::Json(LoginResponse {
        username: principal.username().to_string(),
    }))
}

/// Forget the session principal.
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::{
        fixture_state, session_cookie, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    async fn call_login(body: Value) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .wrap(test_session_middleware())
                .service(login),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(body)
            .to_request();
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn valid_credentials_set_session_cookie() {
        let res = call_login(json!({"username": "admin", "password": "password"})).await;
        assert_eq!(res.status(), StatusCode::OK);
        let _ = session_cookie(&res);
        let body: LoginResponse = test::read_body_json(res).await;
        assert_eq!(body.username, "admin");
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let res = call_login(json!({"username": "admin", "password": "nope"})).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[case(json!({"username": "  ", "password": "password"}), "username", "empty_username")]
    #[case(json!({"username": "admin", "password": ""}), "password", "empty_password")]
    #[actix_web::test]
    async fn blank_fields_are_rejected_with_details(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let res = call_login(payload).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn logout_succeeds_without_session() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .service(logout),
        )
        .await;
        let req = test::TestRequest::post().uri("/auth/logout/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
