//! Candidate submission API and the poll feed
//!
//! Users propose songs by catalog share URL; the service resolves the
//! track/album through the catalog proxy, rejects duplicates, and stamps the
//! submission for the 7-day retention window. The retention sweep runs before
//! every feed or listing read (the "session start" of a browser client).

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::catalog::{self, FeedEntry, NEW_RELEASES_LIMIT};
use crate::db::submissions::{self, NewSubmission};
use crate::AppState;
use slapvote_common::db::models::Submission;
use slapvote_common::time;

/// Request body for POST /api/submissions
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub url: String,
}

/// POST /api/submissions
///
/// Parses the share URL, resolves metadata upstream, rejects (title, artist)
/// duplicates and stores the candidate.
pub async fn submit_song(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Submission>), ApiError> {
    let resource = catalog::parse_resource_url(&request.url).ok_or_else(|| {
        ApiError::BadRequest(
            "Invalid catalog URL. Please provide a valid track or album URL.".to_string(),
        )
    })?;

    let body = state.catalog.item(resource.kind, &resource.id).await?;

    let details = catalog::extract_item_details(resource.kind, &body).ok_or_else(|| {
        ApiError::Catalog(crate::catalog::CatalogError::Parse(
            "Item response missing title or album details".to_string(),
        ))
    })?;

    let new_submission = NewSubmission {
        title: details.title,
        artist: details.artist,
        cover_image: details.cover_image,
        link: details.link,
        release_date: details.release_date,
    };

    match submissions::insert_submission(&state.db, &new_submission).await? {
        Some(stored) => {
            info!(
                title = %stored.title,
                artist = %stored.artist,
                "Stored candidate submission"
            );
            Ok((StatusCode::CREATED, Json(stored)))
        }
        None => Err(ApiError::AlreadyExists(format!(
            "{} by {} already exists in the poll",
            new_submission.title, new_submission.artist
        ))),
    }
}

/// GET /api/submissions
///
/// Lists current candidates, newest first. Sweeps expired rows first so a
/// reader never sees a submission past its retention window.
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    submissions::sweep_expired(&state.db, time::now_ms()).await?;

    let rows = submissions::list_submissions(&state.db).await?;
    Ok(Json(rows))
}

/// GET /api/poll-feed
///
/// The voting queue: upstream new releases followed by current candidate
/// submissions. An upstream failure degrades to an empty release list so
/// candidates remain votable.
pub async fn poll_feed(State(state): State<AppState>) -> Result<Json<Vec<FeedEntry>>, ApiError> {
    submissions::sweep_expired(&state.db, time::now_ms()).await?;

    let mut entries = match state.catalog.new_releases(NEW_RELEASES_LIMIT).await {
        Ok(body) => catalog::map_new_releases(&body),
        Err(e) => {
            warn!(error = %e, "New releases unavailable, serving submissions only");
            Vec::new()
        }
    };

    let candidates = submissions::list_submissions(&state.db).await?;
    entries.extend(candidates.into_iter().map(|s| FeedEntry {
        title: s.title,
        artist: s.artist,
        cover_image: s.cover_image,
        link: s.link,
        release_date: s.release_date,
        user_submitted: true,
    }));

    Ok(Json(entries))
}
