use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::artwork::{Artwork, ALL_COLUMNS, DESCRIPTIVE_COLUMNS, TABLE};
use crate::types::SaveAction;

/// Operations required to manage artworks. Implemented by the Postgres
/// client and by the in-memory store used in tests.
#[async_trait]
pub trait ArtworkStore: Send + Sync {
    /// Load a single artwork by id
    async fn fetch(&self, id: i64) -> Result<Artwork, DatabaseError>;

    /// Load every artwork. Unbounded: cost grows with the table.
    async fn fetch_all(&self) -> Result<Vec<Artwork>, DatabaseError>;

    /// Insert or update an artwork. Inserts return the record with the
    /// store-assigned id; updates return the caller's record unchanged (its
    /// `created_at` is not what the store keeps).
    async fn save(&self, action: SaveAction) -> Result<Artwork, DatabaseError>;

    /// Delete an artwork. Deleting a missing id is not an error.
    async fn remove(&self, id: i64) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub(crate) fn select_statement() -> String {
    format!("SELECT {} FROM {}", ALL_COLUMNS.join(", "), TABLE)
}

pub(crate) fn fetch_statement() -> String {
    format!("{} WHERE id = $1", select_statement())
}

pub(crate) fn insert_statement() -> String {
    let columns = DESCRIPTIVE_COLUMNS
        .iter()
        .copied()
        .chain(std::iter::once("created_at"))
        .collect::<Vec<_>>();
    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        TABLE,
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn update_statement() -> String {
    let assignments = DESCRIPTIVE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>();

    format!(
        "UPDATE {} SET {} WHERE id = ${}",
        TABLE,
        assignments.join(", "),
        DESCRIPTIVE_COLUMNS.len() + 1
    )
}

pub(crate) fn delete_statement() -> String {
    format!("DELETE FROM {} WHERE id = $1", TABLE)
}

/// Artwork client backed by a Postgres pool. Holds no records between calls.
#[derive(Debug, Clone)]
pub struct PgArtworkRepository {
    pool: PgPool,
}

impl PgArtworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut artwork: Artwork) -> Result<Artwork, DatabaseError> {
        let sql = insert_statement();
        let mut query = sqlx::query(&sql);
        for value in artwork.descriptive_values() {
            query = query.bind(value);
        }

        let row = query
            .bind(artwork.created_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("Unable to execute the artworks INSERT statement"))?;

        // An unreadable id leaves the record at 0 rather than failing the insert.
        artwork.id = match row.map(|r| r.try_get::<i64, _>("id")) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                warn!("Inserted artwork but could not read back its id: {}", e);
                0
            }
            None => {
                warn!("Inserted artwork but the store returned no id");
                0
            }
        };

        debug!("Inserted artwork {}", artwork.id);
        Ok(artwork)
    }

    async fn update(&self, artwork: Artwork) -> Result<Artwork, DatabaseError> {
        let sql = update_statement();
        let mut query = sqlx::query(&sql);
        for value in artwork.descriptive_values() {
            query = query.bind(value);
        }

        let result = query
            .bind(artwork.id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("Unable to execute the artworks UPDATE statement"))?;

        debug!("Updated artwork {} ({} rows)", artwork.id, result.rows_affected());
        Ok(artwork)
    }
}

#[async_trait]
impl ArtworkStore for PgArtworkRepository {
    async fn fetch(&self, id: i64) -> Result<Artwork, DatabaseError> {
        let sql = fetch_statement();
        let artwork = sqlx::query_as::<_, Artwork>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("Unable to query the artworks table"))?;

        artwork.ok_or(DatabaseError::NotFound(id))
    }

    async fn fetch_all(&self) -> Result<Vec<Artwork>, DatabaseError> {
        let sql = select_statement();
        let artworks = sqlx::query_as::<_, Artwork>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::query("Unable to query the artworks table"))?;

        debug!("Fetched {} artworks", artworks.len());
        Ok(artworks)
    }

    async fn save(&self, action: SaveAction) -> Result<Artwork, DatabaseError> {
        match action {
            SaveAction::Insert(artwork) => self.insert(artwork).await,
            SaveAction::Update(artwork) => self.update(artwork).await,
        }
    }

    async fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        let sql = delete_statement();
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("Unable to execute the artworks DELETE statement"))?;

        debug!("Deleted artwork {} ({} rows)", id, result.rows_affected());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
