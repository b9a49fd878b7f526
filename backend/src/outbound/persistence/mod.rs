//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`; schema changes ship as embedded migrations.
//!
//! # Example
//!
//! ```no_run
//! use yatube::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), yatube::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/yatube")).await?;
//! let posts = DieselPostRepository::new(pool);
//! # let _ = posts;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_group_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_group_repository::DieselGroupRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
