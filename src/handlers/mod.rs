// handlers/mod.rs - HTTP handlers grouped by resource
pub mod artworks;

pub use artworks::*;
