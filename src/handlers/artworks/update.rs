// handlers/artworks/update.rs - PUT /artworks/:id handler

use axum::{
    body::Bytes,
    extract::{Path, State},
};

use super::utils::{decode_artwork, parse_artwork_id};
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::types::SaveAction;

/// PUT /artworks/:id - Replace the descriptive fields of an artwork.
///
/// The body's `id` must match the one in the URL. `created_at` in the body
/// is ignored; the stored value is kept.
pub async fn artwork_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<()> {
    let artwork = decode_artwork(&body)?;
    let url_id = parse_artwork_id(&id)?;

    if url_id != artwork.id {
        tracing::warn!("Rejected artwork update: URL id {} != body id {}", url_id, artwork.id);
        return Err(ApiError::validation_error(
            "id",
            "Unable to update Artwork, URL ID mismatch body artwork ID",
        ));
    }

    state.store.save(SaveAction::Update(artwork)).await?;
    Ok(ApiResponse::no_content())
}
