pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod types;

pub use app::{app, AppState};
pub use database::{Artwork, ArtworkStore, DatabaseError};
pub use types::{Action, SaveAction};
