use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use artworks_api::config::{AppConfig, Environment, DEFAULT_CONFIG_PATH};
use artworks_api::database::{ArtworkStore, DatabaseManager, MemoryArtworkStore, PgArtworkRepository};
use artworks_api::{app, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Parser)]
#[command(name = "artworks-api")]
#[command(about = "REST API for artwork records")]
#[command(version)]
struct Cli {
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development, help = "Running environment")]
    environment: Environment,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH, help = "Datasource configuration file")]
    config: PathBuf,

    #[arg(long, help = "Port to listen on (overrides ARTWORKS_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, value_enum, default_value_t = StoreKind::Postgres, help = "Artwork store backend")]
    store: StoreKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("artworks_api=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut config = match cli.store {
        StoreKind::Postgres => AppConfig::load(&cli.config, cli.environment)?,
        StoreKind::Memory => AppConfig::for_environment(cli.environment),
    };
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    tracing::info!("Starting Artworks API in {} mode", config.environment);

    let (store, manager): (Arc<dyn ArtworkStore>, Option<DatabaseManager>) = match cli.store {
        StoreKind::Postgres => {
            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("failed to open the artworks database")?;
            let store = PgArtworkRepository::new(manager.pool().clone());
            (Arc::new(store), Some(manager))
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory artwork store; records are lost on exit");
            (Arc::new(MemoryArtworkStore::new()), None)
        }
    };

    let bind_addr = config.api.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Artworks API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
