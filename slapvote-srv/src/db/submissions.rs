//! Candidate submission persistence and retention sweep

use slapvote_common::classify::SUBMISSION_MAX_AGE_MS;
use slapvote_common::db::models::Submission;
use slapvote_common::{time, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Metadata for a new candidate submission
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    pub release_date: Option<String>,
}

/// Insert a candidate submission, stamped with the current time
///
/// Returns `None` when an identical (title, artist) pair already exists;
/// INSERT OR IGNORE makes the duplicate check race-safe.
pub async fn insert_submission(
    pool: &SqlitePool,
    submission: &NewSubmission,
) -> Result<Option<Submission>> {
    let inserted = sqlx::query(
        r#"
        INSERT OR IGNORE INTO submissions (guid, title, artist, cover_image, link, release_date, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&submission.title)
    .bind(&submission.artist)
    .bind(&submission.cover_image)
    .bind(&submission.link)
    .bind(&submission.release_date)
    .bind(time::now_ms())
    .execute(pool)
    .await?;

    if inserted.rows_affected() == 0 {
        return Ok(None);
    }

    let row = sqlx::query_as::<_, Submission>(
        r#"
        SELECT guid, title, artist, cover_image, link, release_date, timestamp
        FROM submissions
        WHERE title = ? AND artist = ?
        "#,
    )
    .bind(&submission.title)
    .bind(&submission.artist)
    .fetch_one(pool)
    .await?;

    Ok(Some(row))
}

/// List candidate submissions, most recent first
pub async fn list_submissions(pool: &SqlitePool) -> Result<Vec<Submission>> {
    let rows = sqlx::query_as::<_, Submission>(
        r#"
        SELECT guid, title, artist, cover_image, link, release_date, timestamp
        FROM submissions
        ORDER BY timestamp DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Delete candidate submissions older than the 7-day retention window
///
/// One atomic multi-delete; deletion is unconditional and irreversible.
/// A submission aged exactly the window is kept (strictly-older-than).
/// Re-running, including races between simultaneously started sessions,
/// is a no-op for already-removed rows.
pub async fn sweep_expired(pool: &SqlitePool, now_ms: i64) -> Result<u64> {
    let cutoff = now_ms - SUBMISSION_MAX_AGE_MS;

    let deleted = sqlx::query("DELETE FROM submissions WHERE timestamp < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;

    if deleted.rows_affected() > 0 {
        tracing::info!(deleted = deleted.rows_affected(), "Swept expired submissions");
    }

    Ok(deleted.rows_affected())
}
