// handlers/artworks/delete.rs - DELETE /artworks/:id handler

use axum::extract::{Path, State};

use super::utils::parse_artwork_id;
use crate::app::AppState;
use crate::middleware::response::{ApiResponse, ApiResult};

/// DELETE /artworks/:id - Responds 204 whether or not the artwork existed
pub async fn artwork_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_artwork_id(&id)?;
    state.store.remove(id).await?;
    Ok(ApiResponse::no_content())
}
