pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryArtworkStore;
pub use models::Artwork;
pub use repository::{ArtworkStore, PgArtworkRepository};
