//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } as service_unavailable => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } as internal => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername { username: String } as conflict => "username already exists: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove an account together with every post it wrote.
    ///
    /// Returns `false` when no such account exists.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
