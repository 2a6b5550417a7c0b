//! Catalog proxy endpoints
//!
//! Stateless pass-throughs: each request performs a fresh credential
//! exchange, issues one authenticated GET and returns the upstream JSON
//! body unchanged. Failures surface in the standard error envelope.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;
use crate::catalog::{ResourceKind, NEW_RELEASES_LIMIT};
use crate::AppState;

/// GET|POST /api/catalog/new-releases
///
/// Passthrough of the provider's `{albums: {items: [...]}}` body.
pub async fn new_releases(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let body = state.catalog.new_releases(NEW_RELEASES_LIMIT).await?;
    Ok(Json(body))
}

/// Query parameters for the single-item lookup
#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
}

/// GET|POST /api/catalog/item?type=track|album&id=...
///
/// Passthrough of the single-resource body; 400 on missing or invalid
/// parameters.
pub async fn catalog_item(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Value>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Missing required parameter: type".to_string()))?;
    let kind = ResourceKind::parse(kind).ok_or_else(|| {
        ApiError::BadRequest("Invalid type (expected \"track\" or \"album\")".to_string())
    })?;

    let id = query
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required parameter: id".to_string()))?;

    let body = state.catalog.item(kind, id).await?;
    Ok(Json(body))
}

/// POST /api/catalog/token
///
/// Passthrough of the raw client-credentials token response.
pub async fn token(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let body = state.catalog.request_token().await?;
    Ok(Json(body))
}
