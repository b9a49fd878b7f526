//! Backend entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use yatube::inbound::http::health::HealthState;
use yatube::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use yatube::domain::{LoginCredentials, User, UserId, Username, hash_password};
use yatube::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use yatube::settings::AppSettings;

/// Apply migrations, then open the connection pool.
async fn prepare_database(pool_config: PoolConfig) -> std::io::Result<DbPool> {
    let migration_url = pool_config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations applied");

    DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)
}

/// Staff account for the in-memory store.
fn seed_staff_user(credentials: &LoginCredentials) -> std::io::Result<User> {
    let username = Username::new(credentials.username()).map_err(std::io::Error::other)?;
    let hash = hash_password(credentials.password()).map_err(std::io::Error::other)?;
    Ok(User::new(UserId::random(), username, hash, true))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_page_size(settings.max_page_amount)
    .with_cache_ttl(settings.cache_ttl());

    match settings.pool_config() {
        Some(pool_config) => {
            config = config.with_db_pool(prepare_database(pool_config).await?);
        }
        None => match settings.seed_credentials().map_err(std::io::Error::other)? {
            Some(credentials) => {
                let user = seed_staff_user(&credentials)?;
                info!(
                    username = %user.username(),
                    "YATUBE_DATABASE_URL unset; posts are kept in memory with a seeded staff account"
                );
                config = config.with_seed_user(user);
            }
            None => warn!(
                "YATUBE_DATABASE_URL unset and no seed account configured; the in-memory blog has no accounts, so it is read-only until YATUBE_SEED_USERNAME and YATUBE_SEED_PASSWORD are set"
            ),
        },
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
