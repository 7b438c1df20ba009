//! # Spotify Integration Module
//!
//! Integration layer between the playlist commands and the Spotify Web API.
//!
//! ```text
//! Command handlers (cli)
//!          ↓
//! PlaylistService trait
//!          ↓
//! SpotifyClient (reqwest, bearer token from TokenManager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with a local callback server
//! - [`client`] - [`SpotifyClient`], the HTTP implementation of [`PlaylistService`]
//! - [`error`] - [`SpotifyError`] and the module's `Result` alias
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user id
//! - `GET /users/{user_id}/playlists` - Playlists of the user, all pages
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `GET /playlists/{playlist_id}/tracks` - Playlist tracks, all pages
//! - `GET /search?type=track&limit=1` - Best catalog match for a query
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks, 100 URIs per request
//! - `DELETE /playlists/{playlist_id}/tracks` - Remove every occurrence of tracks
//! - `POST /api/token` (accounts) - Code exchange and token refresh
//!
//! Handlers only see the [`PlaylistService`] trait, so they can run against a
//! fake implementation in tests.

use async_trait::async_trait;

use crate::types::{CreatedPlaylist, Playlist, Track};

pub mod auth;
pub mod client;
pub mod error;

pub use client::SpotifyClient;
pub use error::{Result, SpotifyError};

/// Remote playlist operations used by the command handlers.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Id of the authenticated user.
    async fn current_user_id(&self) -> Result<String>;

    /// Playlists owned or followed by the user, in the order Spotify lists them.
    async fn user_playlists(&self, user_id: &str) -> Result<Vec<Playlist>>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist>;

    /// Tracks of a playlist in playlist order. Entries without a track object
    /// are left out; tracks without an id (local files) are kept.
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>>;

    /// Highest-ranked catalog track for a free-text query.
    async fn search_track(&self, query: &str) -> Result<Option<Track>>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    /// Removes every occurrence of the given track ids from the playlist.
    async fn remove_all_occurrences(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}
