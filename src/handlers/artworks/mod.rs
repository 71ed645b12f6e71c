// handlers/artworks/mod.rs - Artwork CRUD handlers
//
// Each handler validates its input, makes exactly one store call and maps
// the outcome to a status code. Store errors convert through ApiError.

pub mod create; // PUT /artworks
pub mod delete; // DELETE /artworks/:id
pub mod list;   // GET /artworks
pub mod show;   // GET /artworks/:id
pub mod update; // PUT /artworks/:id
pub mod utils;

pub use create::artwork_create;
pub use delete::artwork_delete;
pub use list::artwork_list;
pub use show::artwork_show;
pub use update::artwork_update;
