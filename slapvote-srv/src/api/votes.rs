//! Vote recording API
//!
//! One vote per request: an atomic increment against the (title, artist)
//! identity, creating the record on first vote. There is no idempotency key;
//! the client advances to the next song after voting.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiError, SongView};
use crate::db::songs::{self, VoteDirection, VoteTarget};
use crate::AppState;

/// Request body for POST /api/votes
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
    #[serde(flatten)]
    pub target: VoteTarget,
}

/// POST /api/votes
///
/// Records a directional vote and returns the updated song with its
/// derived percentage and verdict.
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<SongView>, ApiError> {
    if request.target.title.is_empty() {
        return Err(ApiError::BadRequest("Missing required field: title".to_string()));
    }
    if request.target.artist.is_empty() {
        return Err(ApiError::BadRequest("Missing required field: artist".to_string()));
    }

    let song = songs::record_vote(&state.db, request.direction, &request.target).await?;

    info!(
        title = %song.title,
        artist = %song.artist,
        total_votes = song.total_votes,
        likes = song.likes,
        verdict = ?song.verdict(),
        "Recorded vote"
    );

    Ok(Json(song.into()))
}

/// GET /api/songs
///
/// Full song list with derived fields, most recent first.
pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<SongView>>, ApiError> {
    let songs = songs::list_songs(&state.db).await?;
    Ok(Json(songs.into_iter().map(SongView::from).collect()))
}
