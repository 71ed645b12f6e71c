use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::repository::ArtworkStore;
use crate::error::ApiError;
use crate::handlers::artworks;

/// Shared handler state: a read-only handle to the artwork store
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArtworkStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArtworkStore>) -> Self {
        Self { store }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(artwork_routes())
        // Global middleware; permissive CORS also answers the OPTIONS preflight on /artworks
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/artworks",
            get(artworks::artwork_list).put(artworks::artwork_create),
        )
        .route(
            "/artworks/:id",
            get(artworks::artwork_show)
                .put(artworks::artwork_update)
                .delete(artworks::artwork_delete),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Artworks API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list": "GET /artworks",
            "create": "PUT /artworks",
            "show": "GET /artworks/:id",
            "update": "PUT /artworks/:id",
            "delete": "DELETE /artworks/:id",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.health_check().await.map_err(|e| {
        tracing::warn!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
