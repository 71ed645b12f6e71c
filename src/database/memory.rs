use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::artwork::Artwork;
use crate::database::repository::ArtworkStore;
use crate::types::SaveAction;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Artwork>,
    last_id: i64,
}

/// In-memory artwork store with the same observable behavior as the
/// Postgres client: ids count up from 1, updates of a missing id and
/// deletes of a missing id are silent no-ops.
#[derive(Debug, Default)]
pub struct MemoryArtworkStore {
    table: RwLock<Table>,
}

impl MemoryArtworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows, keeping their ids
    pub fn with_rows(rows: impl IntoIterator<Item = Artwork>) -> Self {
        let mut table = Table::default();
        for row in rows {
            table.last_id = table.last_id.max(row.id);
            table.rows.insert(row.id, row);
        }
        Self { table: RwLock::new(table) }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ArtworkStore for MemoryArtworkStore {
    async fn fetch(&self, id: i64) -> Result<Artwork, DatabaseError> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(DatabaseError::NotFound(id))
    }

    async fn fetch_all(&self) -> Result<Vec<Artwork>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, action: SaveAction) -> Result<Artwork, DatabaseError> {
        let mut table = self.table.write().await;
        match action {
            SaveAction::Insert(mut artwork) => {
                table.last_id += 1;
                artwork.id = table.last_id;
                table.rows.insert(artwork.id, artwork.clone());
                Ok(artwork)
            }
            SaveAction::Update(artwork) => {
                if let Some(row) = table.rows.get_mut(&artwork.id) {
                    row.apply_descriptive(&artwork);
                }
                Ok(artwork)
            }
        }
    }

    async fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
