//! Persistent service state

use std::path::PathBuf;
use std::str::FromStr;

use color_eyre::Result;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

pub mod auth;
pub mod users;

use crate::config;
use crate::model::auth::Session;

static MIGRATOR: Migrator = sqlx::migrate!("model/migrations");

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid SQLite path: {path}")]
    InvalidSQLitePath { path: PathBuf },
}

/// Database backed part of the service state
#[derive(Debug, Clone)]
pub struct Model {
    /// Database access
    db: sqlx::SqlitePool,
}

impl Model {
    /// Model for testing purposes - using the in-memory SQLite database
    pub async fn test() -> Result<Self> {
        Self::with_config(config::Database::default()).await
    }

    /// Model from configuration
    ///
    /// If the database is created in-memory, the migrations are being executed automatically. If
    /// database is file based migrations would be executed only if requested by configuration.
    pub async fn with_config(config: config::Database) -> Result<Self> {
        use config::Database::*;

        let db = match config {
            Memory { max_connections } => {
                // Every parsed `sqlite::memory:` gets its own shared-cache database, which lives as
                // long as any connection to it is open
                let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

                let pool = SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(opts)
                    .await?;

                MIGRATOR.run(&pool).await?;
                pool
            }

            SqLite {
                path,
                max_connections,
                migrate,
            } => {
                let path_str = path
                    .to_str()
                    .ok_or_else(|| Error::InvalidSQLitePath { path: path.clone() })?;

                let opts = SqliteConnectOptions::new()
                    .filename(path_str)
                    .create_if_missing(true)
                    .foreign_keys(true);

                let pool = SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect_lazy_with(opts);

                if migrate {
                    info!(path = %path.display(), "Running database migrations");
                    MIGRATOR.run(&pool).await?;
                }

                pool
            }
        };

        Ok(Self { db })
    }

    /// Accesses the DB pool
    pub fn db(&self) -> &sqlx::SqlitePool {
        &self.db
    }

    /// Performs cleanup on the model, returning number of removed entries
    pub async fn cleanup(&self) -> Result<u64> {
        Session::cleanup(&self.db).await
    }
}
