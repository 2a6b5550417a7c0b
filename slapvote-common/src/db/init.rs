//! Database initialization
//!
//! Creates the database on first run and applies the schema idempotently.
//! WAL mode keeps concurrent vote writes from different sessions from
//! blocking readers; busy_timeout covers writer contention.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer; vote submissions from
    // independent sessions land as serialized atomic increments
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Run schema creation (idempotent - safe to call multiple times)
    create_songs_table(&pool).await?;
    create_submissions_table(&pool).await?;

    Ok(pool)
}

/// Create the songs table
///
/// Song identity is the exact (title, artist) pair, case-sensitive and
/// non-normalized. The UNIQUE constraint is what makes concurrent
/// create-on-first-vote races resolvable with ON CONFLICT.
async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            cover_image TEXT,
            link TEXT,
            likes INTEGER NOT NULL DEFAULT 0,
            dislikes INTEGER NOT NULL DEFAULT 0,
            total_votes INTEGER NOT NULL DEFAULT 0,
            timestamp INTEGER NOT NULL,
            UNIQUE(title, artist)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Chart listings sort by creation time descending
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_timestamp ON songs(timestamp DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the candidate submissions table
///
/// User-proposed songs awaiting votes; rows expire after the 7-day
/// retention window and are removed by the sweep.
async fn create_submissions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            cover_image TEXT,
            link TEXT,
            release_date TEXT,
            timestamp INTEGER NOT NULL,
            UNIQUE(title, artist)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_submissions_timestamp ON submissions(timestamp)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
