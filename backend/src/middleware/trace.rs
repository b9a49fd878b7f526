//! Request correlation middleware.
//!
//! Each request runs inside a `request` span and inside [`TraceId::scope`].
//! A well-formed `trace-id` request header is reused, otherwise a new
//! identifier is minted. The identifier is echoed on the response and the
//! completion event records status and latency.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Correlation middleware for every blog route.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use yatube::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

pub struct TraceMiddleware<S> {
    service: S,
}

fn upstream_trace_id(req: &ServiceRequest) -> TraceId {
    let raw = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    TraceId::inherit_or_generate(raw)
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = upstream_trace_id(&req);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let started = Instant::now();
        let fut = span.in_scope(|| self.service.call(req));

        let handled = async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => warn!(%error, "trace id is not a valid header value"),
            }
            info!(
                status = res.status().as_u16(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            Ok(res)
        };
        Box::pin(TraceId::scope(trace_id, handled.instrument(span)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Error as DomainError;
    use crate::inbound::http::ApiResult;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    const UPSTREAM: &str = "0b7f3c52-8d0e-4b61-a0f4-3a2f9d6c1e77";

    async fn echo_current() -> HttpResponse {
        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
        HttpResponse::Ok().body(id)
    }

    async fn missing_group() -> ApiResult<HttpResponse> {
        Err(DomainError::not_found("group dogs not found"))
    }

    fn header<B>(res: &ServiceResponse<B>, name: &str) -> String {
        res.headers()
            .get(name)
            .expect("header present")
            .to_str()
            .expect("ascii header")
            .to_owned()
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some("garbage"), false)]
    #[case(Some(UPSTREAM), true)]
    #[actix_web::test]
    async fn handlers_see_the_echoed_id(#[case] sent: Option<&str>, #[case] reused: bool) {
        let app = test::init_service(App::new().wrap(Trace).route("/", web::get().to(echo_current)))
            .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = sent {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;

        let echoed = header(&res, TRACE_ID_HEADER);
        assert!(echoed.parse::<TraceId>().is_ok());
        assert_eq!(echoed == UPSTREAM, reused);
        let body = test::read_body(res).await;
        assert_eq!(body, echoed.as_bytes());
    }

    #[actix_web::test]
    async fn error_bodies_carry_the_same_id() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/group/dogs/", web::get().to(missing_group)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/group/dogs/")
                .insert_header((TRACE_ID_HEADER, UPSTREAM))
                .to_request(),
        )
        .await;

        assert_eq!(header(&res, TRACE_ID_HEADER), UPSTREAM);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["traceId"], UPSTREAM);
    }
}
