//! Certified slap/scrap chart listings
//!
//! Pure derivation over the stored counters: filter to the vote floor,
//! partition by verdict, newest first. Recomputed on every read.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{ApiError, SongView};
use crate::db::songs;
use crate::AppState;
use slapvote_common::Verdict;

/// Query parameters for chart listings
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Optional case-insensitive title/artist substring filter
    pub q: Option<String>,
}

/// GET /api/charts/slaps
pub async fn slaps_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<SongView>>, ApiError> {
    chart(&state, Verdict::Slap, query.q).await
}

/// GET /api/charts/scraps
pub async fn scraps_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<SongView>>, ApiError> {
    chart(&state, Verdict::Scrap, query.q).await
}

async fn chart(
    state: &AppState,
    verdict: Verdict,
    search: Option<String>,
) -> Result<Json<Vec<SongView>>, ApiError> {
    // list_songs already sorts by creation timestamp descending
    let songs = songs::list_songs(&state.db).await?;

    let needle = search.map(|s| s.to_lowercase()).filter(|s| !s.is_empty());

    let entries = songs
        .into_iter()
        .filter(|song| song.verdict() == verdict)
        .filter(|song| match &needle {
            Some(q) => {
                song.title.to_lowercase().contains(q) || song.artist.to_lowercase().contains(q)
            }
            None => true,
        })
        .map(SongView::from)
        .collect();

    Ok(Json(entries))
}
