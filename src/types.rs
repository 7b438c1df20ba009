use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw answer of the accounts token endpoint.
///
/// `refresh_token` is absent on refresh responses that keep the old one.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl Token {
    /// Builds a token obtained now, keeping `previous_refresh` when the
    /// response carries no new refresh token.
    pub fn from_response(response: TokenResponse, previous_refresh: &str) -> Self {
        Token {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .unwrap_or_else(|| previous_refresh.to_string()),
            scope: response.scope,
            expires_in: response.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Authorization in progress, shared between the flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub state: String,
    pub credentials: Credentials,
    /// Accounts service the code is exchanged at.
    pub accounts_url: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// One page of a Spotify paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

/// A track as returned by search and playlist listings.
///
/// Local files and unavailable tracks come without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

impl CreatedPlaylist {
    /// The shareable `open.spotify.com` link, if Spotify returned one.
    pub fn link(&self) -> Option<&str> {
        self.external_urls.get("spotify").map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// What happened to a single line of the songs file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongOutcome {
    Added,
    Skipped,
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongReport {
    pub query: String,
    pub outcome: SongOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSongsSummary {
    pub reports: Vec<SongReport>,
    pub added_uris: Vec<String>,
}

impl AddSongsSummary {
    pub fn count(&self, outcome: &SongOutcome) -> usize {
        self.reports.iter().filter(|r| &r.outcome == outcome).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub duplicates: Vec<String>,
}
