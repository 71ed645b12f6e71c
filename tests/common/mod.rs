#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use artworks_api::database::{Artwork, ArtworkStore, DatabaseError, MemoryArtworkStore};
use artworks_api::{app, AppState, SaveAction};

pub fn sample_artwork(id: i64, rei: &str) -> Artwork {
    Artwork {
        id,
        rei: rei.to_string(),
        created_at: 1489140631,
        pro: "Ayuntamiento de Mahón".to_string(),
        ubi: "Desconocido".to_string(),
        tit: "Sample".to_string(),
        ..Default::default()
    }
}

/// Router over a seeded in-memory store, plus a handle to that store
pub fn memory_app(rows: Vec<Artwork>) -> (Router, Arc<MemoryArtworkStore>) {
    let store = Arc::new(MemoryArtworkStore::with_rows(rows));
    (app(AppState::new(store.clone())), store)
}

/// Store whose every operation fails the way an unreachable database does
pub struct FailingStore;

fn unavailable(context: &'static str) -> DatabaseError {
    DatabaseError::QueryError {
        context,
        source: sqlx::Error::PoolTimedOut,
    }
}

#[async_trait]
impl ArtworkStore for FailingStore {
    async fn fetch(&self, _id: i64) -> Result<Artwork, DatabaseError> {
        Err(unavailable("Unable to query the artworks table"))
    }

    async fn fetch_all(&self) -> Result<Vec<Artwork>, DatabaseError> {
        Err(unavailable("Unable to query the artworks table"))
    }

    async fn save(&self, _action: SaveAction) -> Result<Artwork, DatabaseError> {
        Err(unavailable("Unable to execute the artworks INSERT or UPDATE statement"))
    }

    async fn remove(&self, _id: i64) -> Result<(), DatabaseError> {
        Err(unavailable("Unable to execute the artworks DELETE statement"))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

pub fn failing_app() -> Router {
    app(AppState::new(Arc::new(FailingStore)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response body is not JSON ({}): {:?}", e, String::from_utf8_lossy(&self.body)))
    }
}

/// Drive one request through the router without a network listener
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let content_type = body.map(|_| "application/json");
    send_with_content_type(app, method, uri, body, content_type).await
}

/// Like `send`, with control over the `Content-Type` header (`None` omits it)
pub async fn send_with_content_type(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    content_type: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = content_type {
        builder = builder.header(header::CONTENT_TYPE, value);
    }
    let body = body.map(|raw| Body::from(raw.to_string())).unwrap_or_else(Body::empty);

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, body }
}

/// The real binary, running with the in-memory store on a free port
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_artworks-api"))
            .args(["--store", "memory", "--port", &port.to_string()])
            .env("ARTWORKS_API_HOST", "127.0.0.1")
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
