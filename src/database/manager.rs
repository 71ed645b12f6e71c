use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("The given action is not valid: {0:?}, it should be either INSERT or UPDATE")]
    InvalidAction(String),

    #[error("Unable to find an artwork with id: {0}")]
    NotFound(i64),

    #[error("{context}: {source}")]
    QueryError {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Wrap a driver error with the statement it came from
    pub fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> DatabaseError {
        move |source| DatabaseError::QueryError { context, source }
    }
}

/// Owns the connection pool for the artworks datasource
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open a pool against the configured datasource
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.datasource.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("datasource"));
        }
        let redacted = Self::redact(&config.datasource)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.datasource)
            .await?;

        info!("Created database pool for: {}", redacted);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    /// Datasource with the password masked, safe for logs
    pub fn redact(datasource: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(datasource).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
