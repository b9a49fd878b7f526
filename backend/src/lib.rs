//! Yatube blog backend.
//!
//! Layout follows ports and adapters: `domain` holds entities, ports and
//! services; `inbound::http` exposes them over actix-web; `outbound` holds
//! the Diesel, in-memory and page cache adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
