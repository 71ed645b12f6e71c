// Runs against a live Postgres: DATABASE_URL=... cargo test -- --ignored
mod common;

use anyhow::{Context, Result};
use sqlx::{Executor, PgPool};

use artworks_api::database::{Artwork, ArtworkStore, DatabaseError, PgArtworkRepository};
use artworks_api::SaveAction;

async fn pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&url).await?;
    pool.execute(include_str!("../sql/artworks.sql")).await?;
    Ok(pool)
}

async fn repository() -> Result<PgArtworkRepository> {
    Ok(PgArtworkRepository::new(pool().await?))
}

fn unique_rei(prefix: &str) -> String {
    format!("#{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn insert_then_fetch_round_trips() -> Result<()> {
    let repo = repository().await?;
    let artwork = Artwork {
        rei: unique_rei("insert"),
        created_at: 1489140631,
        ..common::sample_artwork(0, "")
    };

    let saved = repo.save(SaveAction::Insert(artwork.clone())).await?;
    assert!(saved.id > 0);

    let fetched = repo.fetch(saved.id).await?;
    assert_eq!(fetched, Artwork { id: saved.id, ..artwork });

    repo.remove(saved.id).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_leaves_created_at_untouched() -> Result<()> {
    let repo = repository().await?;
    let saved = repo
        .save(SaveAction::Insert(Artwork { rei: unique_rei("update"), created_at: 100, ..Default::default() }))
        .await?;

    let changed = Artwork { tit: "Renamed".into(), created_at: 999, ..saved.clone() };
    let returned = repo.save(SaveAction::Update(changed.clone())).await?;
    assert_eq!(returned, changed);

    let fetched = repo.fetch(saved.id).await?;
    assert_eq!(fetched.tit, "Renamed");
    assert_eq!(fetched.created_at, 100);

    repo.remove(saved.id).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn fetch_missing_is_not_found() -> Result<()> {
    let repo = repository().await?;
    match repo.fetch(i64::MAX).await {
        Err(DatabaseError::NotFound(id)) => assert_eq!(id, i64::MAX),
        other => panic!("expected NotFound, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn remove_twice_succeeds() -> Result<()> {
    let repo = repository().await?;
    let saved = repo
        .save(SaveAction::Insert(Artwork { rei: unique_rei("remove"), ..Default::default() }))
        .await?;

    repo.remove(saved.id).await?;
    repo.remove(saved.id).await?;
    assert!(matches!(repo.fetch(saved.id).await, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn fetch_all_includes_inserted_rows() -> Result<()> {
    let repo = repository().await?;
    let rei = unique_rei("all");
    let saved = repo
        .save(SaveAction::Insert(Artwork { rei: rei.clone(), ..Default::default() }))
        .await?;

    let all = repo.fetch_all().await?;
    assert!(all.iter().any(|a| a.id == saved.id && a.rei == rei));

    repo.remove(saved.id).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn health_check_pings_the_pool() -> Result<()> {
    repository().await?.health_check().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn null_text_columns_fetch_as_empty_strings() -> Result<()> {
    let pool = pool().await?;
    // Tables created from an older fixture may still carry NOT NULL.
    pool.execute("ALTER TABLE artworks ALTER COLUMN tit DROP NOT NULL, ALTER COLUMN aut DROP NOT NULL")
        .await?;

    let rei = unique_rei("nulls");
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO artworks (rei, tit, aut, created_at) VALUES ($1, NULL, NULL, 1) RETURNING id",
    )
    .bind(&rei)
    .fetch_one(&pool)
    .await?;

    let repo = PgArtworkRepository::new(pool);
    let fetched = repo.fetch(id).await?;
    assert_eq!(fetched.rei, rei);
    assert_eq!(fetched.tit, "");
    assert_eq!(fetched.aut, "");
    assert_eq!(fetched.created_at, 1);

    let listed = repo.fetch_all().await?;
    assert!(listed.iter().any(|a| a.id == id && a.tit.is_empty()));

    repo.remove(id).await?;
    Ok(())
}
