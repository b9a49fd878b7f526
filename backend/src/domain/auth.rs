//! Authentication primitives: login credentials and password hashing.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash as EncodedHash};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use super::PasswordHash;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use yatube::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" leo ", "secret").unwrap();
/// assert_eq!(creds.username(), "leo");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failure to produce or read an encoded password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashingError {
    /// Hashing the plaintext failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Hash `password` with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordHashingError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashingError::Hash {
            message: err.to_string(),
        })?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHashingError::Hash {
        message: err.to_string(),
    })
}

/// Check `password` against a stored hash.
///
/// Returns `Ok(false)` on mismatch; only malformed hashes are errors.
pub fn verify_password(password: &str, stored: &PasswordHash) -> Result<bool, PasswordHashingError> {
    let parsed = EncodedHash::new(stored.as_str()).map_err(|err| PasswordHashingError::Malformed {
        message: err.to_string(),
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashingError::Malformed {
            message: err.to_string(),
        }),
    }
}
