//! slapvote-srv library - music review and voting backend
//!
//! HTTP microservice for the slapvote application: vote recording with
//! atomic increments, derived slap/scrap charts, candidate-submission
//! lifecycle with 7-day retention, and the catalog-provider proxy that
//! keeps application secrets off the client.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod catalog;
pub mod db;

use catalog::CatalogClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Catalog provider client (proxy upstream)
    pub catalog: CatalogClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: CatalogClient) -> Self {
        Self { db, catalog }
    }
}

/// Build application router
///
/// CORS is permissive: the browser client is served from a different
/// origin and all endpoints are read/vote-grade public API.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/songs", get(api::list_songs))
        .route("/api/votes", post(api::submit_vote))
        .route("/api/charts/slaps", get(api::slaps_chart))
        .route("/api/charts/scraps", get(api::scraps_chart))
        .route(
            "/api/submissions",
            get(api::list_submissions).post(api::submit_song),
        )
        .route("/api/poll-feed", get(api::poll_feed))
        .route(
            "/api/catalog/new-releases",
            get(api::new_releases).post(api::new_releases),
        )
        .route(
            "/api/catalog/item",
            get(api::catalog_item).post(api::catalog_item),
        )
        .route("/api/catalog/token", post(api::token))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
