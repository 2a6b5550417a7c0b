//! HTTP API handlers for slapvote-srv

pub mod catalog;
pub mod charts;
pub mod health;
pub mod submissions;
pub mod votes;

pub use catalog::{catalog_item, new_releases, token};
pub use charts::{scraps_chart, slaps_chart};
pub use health::health_routes;
pub use submissions::{list_submissions, poll_feed, submit_song};
pub use votes::{list_songs, submit_vote};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use slapvote_common::db::models::Song;
use slapvote_common::Verdict;

use crate::catalog::CatalogError;

/// A song with its derived approval percentage and verdict attached
///
/// The derived fields are recomputed from the counters on every read;
/// they are the source of truth, never a stored flag.
#[derive(Debug, Clone, Serialize)]
pub struct SongView {
    #[serde(flatten)]
    pub song: Song,
    pub percentage: f64,
    pub verdict: Verdict,
}

impl From<Song> for SongView {
    fn from(song: Song) -> Self {
        let percentage = song.percentage();
        let verdict = song.verdict();
        Self {
            song,
            percentage,
            verdict,
        }
    }
}

/// API errors shared by the handler modules
///
/// Every failure surfaces as a `{"error": ...}` JSON envelope: 400 for
/// malformed caller input, 409 for duplicate submissions, 500 for
/// configuration, database and upstream failures. Nothing is retried.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    AlreadyExists(String),
    Database(String),
    Catalog(CatalogError),
}

impl From<slapvote_common::Error> for ApiError {
    fn from(err: slapvote_common::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
            ApiError::Catalog(err) => {
                tracing::error!(error = %err, "Catalog proxy call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
