//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed blog entities (users, groups, posts),
//! the post form rules and the services implementing the driving ports.
//! Types stay free of transport and storage concerns; adapters live under
//! `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Group, Post: stored entities.
//! - PostFormData: raw form values and their validation.
//! - FeedService, PostService, PasswordLoginService: port implementations.

pub mod auth;
pub mod error;
mod feed_service;
pub mod group;
mod login_service;
pub mod ports;
pub mod post;
pub mod post_form;
mod post_service;
mod slug;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordHashingError, hash_password, verify_password,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_service::{DEFAULT_PAGE_SIZE, FeedService};
pub use self::group::{
    GROUP_SLUG_MAX, GROUP_TITLE_MAX, Group, GroupId, GroupSlug, GroupSummary,
    GroupValidationError, NewGroup,
};
pub use self::login_service::PasswordLoginService;
pub use self::post::{
    IMAGE_REF_MAX, ImageRef, NewPost, Post, PostContent, PostDraft, PostId, PostText,
    PostValidationError,
};
pub use self::post_form::{
    BLANK_IMAGE_MESSAGE, IMAGE_TOO_LONG_MESSAGE, INVALID_GROUP_MESSAGE, PostForm, PostFormData,
    PostFormErrors, PostFormField, TEXT_REQUIRED_MESSAGE,
};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Author, PasswordHash, Principal, USERNAME_MAX, User, UserId, UserValidationError, Username,
};
