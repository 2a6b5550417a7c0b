//! Song vote persistence
//!
//! Vote counters are only ever mutated with server-side atomic increments so
//! that N concurrent voters produce exactly N increments. Lookup is by the
//! exact (title, artist) pair.

use serde::{Deserialize, Serialize};
use slapvote_common::db::models::Song;
use slapvote_common::{time, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Direction of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

/// Song identity and display metadata accompanying a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteTarget {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Record one vote against a song, creating the record on first vote
///
/// The increment happens inside the database (`counter = counter + ?`), never
/// as a read-modify-write from client state. A create race between two first
/// voters resolves through the UNIQUE(title, artist) constraint: the loser's
/// INSERT turns into the same atomic increment.
pub async fn record_vote(
    pool: &SqlitePool,
    direction: VoteDirection,
    target: &VoteTarget,
) -> Result<Song> {
    let (like_inc, dislike_inc) = match direction {
        VoteDirection::Up => (1i64, 0i64),
        VoteDirection::Down => (0i64, 1i64),
    };

    let updated = sqlx::query(
        r#"
        UPDATE songs
        SET total_votes = total_votes + 1,
            likes = likes + ?,
            dislikes = dislikes + ?
        WHERE title = ? AND artist = ?
        "#,
    )
    .bind(like_inc)
    .bind(dislike_inc)
    .bind(&target.title)
    .bind(&target.artist)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        sqlx::query(
            r#"
            INSERT INTO songs (guid, title, artist, cover_image, link, likes, dislikes, total_votes, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)
            ON CONFLICT(title, artist) DO UPDATE SET
                total_votes = songs.total_votes + 1,
                likes = songs.likes + excluded.likes,
                dislikes = songs.dislikes + excluded.dislikes
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&target.title)
        .bind(&target.artist)
        .bind(&target.cover_image)
        .bind(&target.link)
        .bind(like_inc)
        .bind(dislike_inc)
        .bind(time::now_ms())
        .execute(pool)
        .await?;
    }

    load_song(pool, &target.title, &target.artist).await
}

/// Load a song by its exact (title, artist) identity
pub async fn load_song(pool: &SqlitePool, title: &str, artist: &str) -> Result<Song> {
    let song = sqlx::query_as::<_, Song>(
        r#"
        SELECT guid, title, artist, cover_image, link, likes, dislikes, total_votes, timestamp
        FROM songs
        WHERE title = ? AND artist = ?
        "#,
    )
    .bind(title)
    .bind(artist)
    .fetch_one(pool)
    .await?;

    Ok(song)
}

/// Load all songs, most recent first
///
/// Chart verdicts are derived from the returned counters at read time; no
/// certified flag is stored.
pub async fn list_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(
        r#"
        SELECT guid, title, artist, cover_image, link, likes, dislikes, total_votes, timestamp
        FROM songs
        ORDER BY timestamp DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(songs)
}
