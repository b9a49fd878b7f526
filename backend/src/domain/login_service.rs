//! Password login backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, Principal, UserId, Username, verify_password};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Login service checking credentials against stored argon2 hashes.
#[derive(Clone)]
pub struct PasswordLoginService<U> {
    users: Arc<U>,
}

impl<U> PasswordLoginService<U> {
    /// Create a service reading accounts from `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for PasswordLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
        // Argon2 is CPU-bound; keep it off the async workers.
        let password = Zeroizing::new(credentials.password().to_owned());
        let stored = user.password_hash().clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|err| Error::internal(format!("password check did not complete: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?;
        if matches {
            Ok(Principal::from(&user))
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }

    async fn resolve(&self, id: &UserId) -> Result<Option<Principal>, Error> {
        let user = self.users.find_by_id(id).await?;
        Ok(user.as_ref().map(Principal::from))
    }
}
