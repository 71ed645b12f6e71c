// handlers/artworks/show.rs - GET /artworks/:id handler

use axum::extract::{Path, State};

use super::utils::parse_artwork_id;
use crate::app::AppState;
use crate::database::models::artwork::Artwork;
use crate::middleware::response::{ApiResponse, ApiResult};

pub async fn artwork_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Artwork> {
    let id = parse_artwork_id(&id)?;
    let artwork = state.store.fetch(id).await?;
    Ok(ApiResponse::success(artwork))
}
