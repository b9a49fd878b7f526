//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`], so domain
//! types never depend on utoipa. The document backs Swagger UI in debug
//! builds and is exported by the `openapi-dump` binary.

use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::posts::{GroupField, PostFormPayload};
use crate::inbound::http::schemas::{
    AuthorSchema, ErrorCodeSchema, ErrorSchema, GroupSummarySchema, PostSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the blog API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Yatube API",
        description = "Paginated post feeds, post authoring and session login.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feeds::index,
        crate::inbound::http::feeds::group_posts,
        crate::inbound::http::feeds::profile,
        crate::inbound::http::feeds::post_detail,
        crate::inbound::http::posts::create_form,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::edit_form,
        crate::inbound::http::posts::edit_post,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::admin::clear_page_cache,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PostSchema,
        AuthorSchema,
        GroupSummarySchema,
        LoginRequest,
        LoginResponse,
        PostFormPayload,
        GroupField,
    )),
    tags(
        (name = "feeds", description = "Paginated post listings and post detail"),
        (name = "posts", description = "Creating and editing posts"),
        (name = "auth", description = "Session login and logout"),
        (name = "admin", description = "Staff maintenance operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
