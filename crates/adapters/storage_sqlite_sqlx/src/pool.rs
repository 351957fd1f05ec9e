//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const DROP_SCHEMA: [&str; 2] = [
    "DROP TABLE IF EXISTS products",
    "DROP TABLE IF EXISTS _sqlx_migrations",
];

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:catalog.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Drop and rebuild the schema when applied migrations no longer match
    /// the embedded ones. Destroys all rows; development use only.
    pub recreate_on_schema_change: bool,
}

impl Config {
    /// Configuration for `database_url` with schema recreation disabled.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            recreate_on_schema_change: false,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(config: &Config) -> Result<Self, StorageError> {
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        match MIGRATOR.run(&pool).await {
            Ok(()) => {}
            Err(err @ (MigrateError::VersionMismatch(_) | MigrateError::VersionMissing(_)))
                if config.recreate_on_schema_change =>
            {
                tracing::warn!(error = %err, "schema changed, dropping and recreating all tables");
                drop_schema(&pool).await?;
                MIGRATOR.run(&pool).await?;
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!("database migrations applied");

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn drop_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut tx = pool.begin().await?;
    for statement in DROP_SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
