// handlers/artworks/create.rs - PUT /artworks handler

use axum::{body::Bytes, extract::State};
use chrono::Utc;

use super::utils::decode_artwork;
use crate::app::AppState;
use crate::database::models::artwork::Artwork;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::types::SaveAction;

/// PUT /artworks - Insert a new artwork.
///
/// `created_at` is always set to the current time, whatever the client sent;
/// any `id` in the body is ignored. Responds 201 with the stored record.
pub async fn artwork_create(State(state): State<AppState>, body: Bytes) -> ApiResult<Artwork> {
    let mut artwork = decode_artwork(&body)?;
    artwork.created_at = Utc::now().timestamp();

    let artwork = state.store.save(SaveAction::Insert(artwork)).await?;
    tracing::info!("Created artwork {}", artwork.id);

    Ok(ApiResponse::created(artwork))
}
