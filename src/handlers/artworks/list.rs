// handlers/artworks/list.rs - GET /artworks handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::artwork::Artwork;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /artworks - Every stored artwork as a JSON array
pub async fn artwork_list(State(state): State<AppState>) -> ApiResult<Vec<Artwork>> {
    let artworks = state.store.fetch_all().await?;
    Ok(ApiResponse::success(artworks))
}
