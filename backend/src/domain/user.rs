//! User accounts, their public projection and the request principal.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Username was empty.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the maximum length.
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Username contained characters outside the allowed set.
    #[error("username may only contain letters, digits and @/./+/-/_ characters")]
    UsernameInvalidCharacters,
    /// Stored password hash was empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 150;

static USERNAME_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn username_has_allowed_chars(value: &str) -> bool {
    // Length is enforced separately; the pattern only constrains characters.
    USERNAME_RE
        .get_or_init(|| Regex::new(r"^[\w.@+-]+$"))
        .as_ref()
        .is_ok_and(|re| re.is_match(value))
}

/// Login name, unique across users and used in profile URLs.
///
/// ## Invariants
/// - 1 to 150 characters.
/// - Letters, digits and `@ . + - _` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use yatube::domain::Username;
    ///
    /// assert!(Username::new("leo.tolstoy").is_ok());
    /// assert!(Username::new("no spaces").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if value.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_has_allowed_chars(&value) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password hash in PHC string format.
///
/// Never serialised; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash read from storage.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    is_staff: bool,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash, is_staff: bool) -> Self {
        Self {
            id,
            username,
            password_hash,
            is_staff,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the user may run operator actions.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Public projection shown next to posts and on profiles.
    pub fn author(&self) -> Author {
        Author::new(self.id.clone(), self.username.clone())
    }
}

/// Public view of a user as the author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: UserId,
    username: Username,
}

impl Author {
    /// Build an author reference.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Author identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Author login name.
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Authenticated user for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    id: UserId,
    username: Username,
    is_staff: bool,
}

impl Principal {
    /// Build a principal from its parts.
    pub fn new(id: UserId, username: Username, is_staff: bool) -> Self {
        Self {
            id,
            username,
            is_staff,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Whether operator actions are allowed.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Whether this principal wrote a post by `author`.
    pub fn is_author(&self, author: &Author) -> bool {
        &self.id == author.id()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            is_staff: user.is_staff,
        }
    }
}

#[cfg(test)]
mod tests;
