//! Driving port for login and session principal lookups.
//!
//! Inbound adapters call it to authenticate credentials and to turn the user
//! id stored in a session back into a principal, without importing the
//! backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, UserId, Username};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;

    /// Load the principal for a session user id; `None` when the account is gone.
    async fn resolve(&self, id: &UserId) -> Result<Option<Principal>, Error>;
}

const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator for handler tests.
///
/// `admin` / `password` authenticates as a staff account with a fixed id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    fn principal() -> Result<Principal, Error> {
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let username = Username::new("admin")
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        Ok(Principal::new(id, username, true))
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            Self::principal()
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }

    async fn resolve(&self, id: &UserId) -> Result<Option<Principal>, Error> {
        let principal = Self::principal()?;
        Ok((principal.id() == id).then_some(principal))
    }
}
