//! Correlation identifier for one HTTP request.
//!
//! The identifier lives in tokio task-local storage for the lifetime of the
//! request future, so error constructors deep inside a service can stamp it
//! without it being passed around. Work moved onto another task must be
//! wrapped in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Request and response header carrying the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// UUID naming a single request in logs and error bodies.
///
/// # Examples
/// ```
/// use yatube::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let id = TraceId::inherit_or_generate(Some("6f1c1c4e-2b4a-4d7e-9a55-0d6f5e7c9b21"));
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an upstream identifier when it is a well-formed UUID.
    ///
    /// Anything else, including the nil UUID, yields a fresh identifier so a
    /// client cannot make unrelated requests share one.
    #[must_use]
    pub fn inherit_or_generate(upstream: Option<&str>) -> Self {
        upstream
            .and_then(|raw| raw.trim().parse::<Self>().ok())
            .filter(|id| !id.0.is_nil())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
