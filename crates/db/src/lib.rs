//! PostgreSQL access layer for the storefront product configurator.
//!
//! Query construction goes through [`query::SelectQuery`]; rows are decoded
//! into the structs under [`models`] and turned into configurator trees by
//! [`hydrator::ConfiguratorHydrator`].

pub mod config;
pub mod configurator_service;
pub mod field_helper;
pub mod hydrator;
pub mod models;
pub mod query;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the schema migrations under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
