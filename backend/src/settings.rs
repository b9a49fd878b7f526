//! Application settings loaded via OrthoConfig.
//!
//! Values come from `YATUBE_*` environment variables, the matching CLI flags
//! and configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{LoginCredentials, LoginValidationError};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "YATUBE")]
pub struct AppSettings {
    /// Posts per feed page.
    #[ortho_config(default = 10)]
    pub max_page_amount: usize,
    /// Lifetime of cached listing pages, in seconds.
    #[ortho_config(default = 20)]
    pub cache_ttl_secs: u64,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it posts live in process memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 5)]
    pub db_checkout_timeout_secs: u64,
    /// Staff account created in the in-memory store at startup.
    pub seed_username: Option<String>,
    /// Password for `seed_username`.
    pub seed_password: Option<String>,
}

/// Settings that parse but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("seed username and seed password must be set together")]
    IncompleteSeedAccount,
    #[error("invalid seed account: {source}")]
    SeedAccount {
        #[source]
        source: LoginValidationError,
    },
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Page cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Credentials of the staff account to seed, if one is configured.
    pub fn seed_credentials(&self) -> Result<Option<LoginCredentials>, SettingsError> {
        match (self.seed_username.as_deref(), self.seed_password.as_deref()) {
            (None, None) => Ok(None),
            (Some(username), Some(password)) => LoginCredentials::try_from_parts(username, password)
                .map(Some)
                .map_err(|source| SettingsError::SeedAccount { source }),
            _ => Err(SettingsError::IncompleteSeedAccount),
        }
    }

    /// Pool configuration, or `None` when the in-memory store is wanted.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections)
                .with_connection_timeout(Duration::from_secs(self.db_checkout_timeout_secs))
        })
    }
}
