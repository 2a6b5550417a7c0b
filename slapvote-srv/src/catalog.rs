//! Catalog provider client
//!
//! Proxies read-only queries against the third-party music catalog so the
//! application secrets never reach the browser. Every call performs a fresh
//! client-credentials exchange against the provider token endpoint; tokens
//! are deliberately not cached and failures are not retried.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slapvote_common::config::CatalogCredentials;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Page size for the new-releases browse query
pub const NEW_RELEASES_LIMIT: u32 = 25;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required secrets absent from the process environment
    #[error("Missing catalog credentials")]
    MissingCredentials,

    #[error("Network error: {0}")]
    Network(String),

    /// Token endpoint answered 2xx but without an access token
    #[error("Token response missing access_token")]
    MissingToken,

    /// Provider rejected the request (auth or resource failure)
    #[error("Upstream error {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Catalog resource kinds the proxy understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Track,
    Album,
}

impl ResourceKind {
    /// API collection path for this resource kind
    fn api_path(&self) -> &'static str {
        match self {
            ResourceKind::Track => "tracks",
            ResourceKind::Album => "albums",
        }
    }

    /// Parse the caller-supplied `type` query parameter
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "track" => Some(ResourceKind::Track),
            "album" => Some(ResourceKind::Album),
            _ => None,
        }
    }
}

/// A track/album reference extracted from a catalog share URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: String,
}

/// Extract a track or album reference from a share URL
///
/// Looks for a `track/<id>` or `album/<id>` path segment pair; query strings
/// and fragments on the id segment are dropped.
pub fn parse_resource_url(url: &str) -> Option<ResourceRef> {
    let parts: Vec<&str> = url.split('/').collect();

    for kind in [ResourceKind::Track, ResourceKind::Album] {
        let marker = match kind {
            ResourceKind::Track => "track",
            ResourceKind::Album => "album",
        };
        if let Some(idx) = parts.iter().position(|p| *p == marker) {
            if let Some(raw_id) = parts.get(idx + 1) {
                let id = raw_id
                    .split(['?', '#'])
                    .next()
                    .unwrap_or_default()
                    .to_string();
                if !id.is_empty() {
                    return Some(ResourceRef { kind, id });
                }
            }
        }
    }

    None
}

/// Catalog API client
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    token_url: String,
    api_base: String,
    credentials: Option<CatalogCredentials>,
}

impl CatalogClient {
    /// Create a client against the real provider endpoints
    ///
    /// Missing credentials are not fatal here; each proxy call reports them
    /// as a fixed per-request failure instead.
    pub fn new(credentials: Option<CatalogCredentials>) -> Result<Self, CatalogError> {
        Self::with_endpoints(credentials, DEFAULT_TOKEN_URL, DEFAULT_API_BASE)
    }

    /// Create a client against custom endpoints (tests point this at a stub)
    pub fn with_endpoints(
        credentials: Option<CatalogCredentials>,
        token_url: &str,
        api_base: &str,
    ) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http,
            token_url: token_url.to_string(),
            api_base: api_base.to_string(),
            credentials,
        })
    }

    /// Perform the client-credentials exchange and return the raw token body
    ///
    /// The full provider response (access_token, token_type, expires_in, ...)
    /// is passed through unmodified.
    pub async fn request_token(&self) -> Result<Value, CatalogError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(CatalogError::MissingCredentials)?;

        tracing::debug!(url = %self.token_url, "Requesting catalog access token");

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Exchange credentials and extract the bearer token
    async fn access_token(&self) -> Result<String, CatalogError> {
        let body = self.request_token().await?;
        body.get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(CatalogError::MissingToken)
    }

    /// Fetch the new-releases listing, passed through as raw JSON
    pub async fn new_releases(&self, limit: u32) -> Result<Value, CatalogError> {
        let token = self.access_token().await?;
        let url = format!("{}/browse/new-releases?limit={}", self.api_base, limit);
        self.get_json(&url, &token).await
    }

    /// Fetch a single track or album, passed through as raw JSON
    pub async fn item(&self, kind: ResourceKind, id: &str) -> Result<Value, CatalogError> {
        let token = self.access_token().await?;
        let url = format!("{}/{}/{}", self.api_base, kind.api_path(), id);
        self.get_json(&url, &token).await
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<Value, CatalogError> {
        tracing::debug!(url = %url, "Querying catalog API");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// A voting-queue entry derived from upstream releases or candidate
/// submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    pub release_date: Option<String>,
    pub user_submitted: bool,
}

/// Map the raw new-releases body into feed entries
///
/// Artist display names are joined with ", "; the album id doubles as the
/// external link. Items missing a name are skipped.
pub fn map_new_releases(body: &Value) -> Vec<FeedEntry> {
    let items = body
        .pointer("/albums/items")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    items
        .iter()
        .filter_map(|album| {
            let title = album.get("name")?.as_str()?.to_string();
            Some(FeedEntry {
                title,
                artist: joined_artists(album),
                cover_image: first_image_url(album),
                link: album.get("id").and_then(|v| v.as_str()).map(str::to_string),
                release_date: album
                    .get("release_date")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                user_submitted: false,
            })
        })
        .collect()
}

/// Metadata extracted from a single track/album lookup
#[derive(Debug, Clone)]
pub struct ItemDetails {
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    pub release_date: Option<String>,
}

/// Pull submission metadata out of a raw track or album body
///
/// Tracks take their cover image and release date from the containing album
/// and link to that album; albums describe themselves.
pub fn extract_item_details(kind: ResourceKind, body: &Value) -> Option<ItemDetails> {
    let title = body.get("name")?.as_str()?.to_string();
    let artist = joined_artists(body);

    let (cover_image, release_date, link) = match kind {
        ResourceKind::Track => {
            let album = body.get("album")?;
            (
                first_image_url(album),
                album
                    .get("release_date")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                album.get("id").and_then(|v| v.as_str()).map(str::to_string),
            )
        }
        ResourceKind::Album => (
            first_image_url(body),
            body.get("release_date")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            body.get("id").and_then(|v| v.as_str()).map(str::to_string),
        ),
    };

    Some(ItemDetails {
        title,
        artist,
        cover_image,
        link,
        release_date,
    })
}

fn joined_artists(value: &Value) -> String {
    value
        .get("artists")
        .and_then(|v| v.as_array())
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| a.get("name").and_then(|n| n.as_str()))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn first_image_url(value: &Value) -> Option<String> {
    value
        .pointer("/images/0/url")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
