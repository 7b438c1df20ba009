//! # CLI Module
//!
//! Handlers behind the `spotlist` subcommands. Each handler receives the
//! service client as a [`PlaylistService`] trait object and prints status
//! lines while it works.
//!
//! - [`auth`] - Runs the Spotify authorization flow
//! - [`create_playlist`] - Creates a public playlist
//! - [`add_songs`] - Adds searched songs, skipping tracks already present
//! - [`cleanup`] - Removes repeated tracks from a playlist
//!
//! Handlers return `Result<_, SpotifyError>`. A playlist that cannot be found
//! comes back as [`SpotifyError::PlaylistNotFound`], which the dispatcher
//! reports without failing the process.
//!
//! ```bash
//! spotlist create-playlist "Road Trip" --description "Songs for the car"
//! spotlist add-songs "Road Trip" songs.txt
//! spotlist cleanup "Road Trip"
//! ```

mod auth;
mod cleanup;
mod playlist;
mod songs;

pub use auth::auth;
pub use cleanup::cleanup;
pub use playlist::create_playlist;
pub use songs::add_songs;
pub use songs::read_song_queries;

use crate::{
    spotify::{PlaylistService, Result, SpotifyError},
    types::Playlist,
    utils,
};

/// Looks up a playlist of the current user by exact name.
async fn find_playlist(service: &dyn PlaylistService, playlist_name: &str) -> Result<Playlist> {
    let user_id = service.current_user_id().await?;
    let playlists = service.user_playlists(&user_id).await?;

    utils::find_playlist_by_name(&playlists, playlist_name)
        .cloned()
        .ok_or_else(|| SpotifyError::PlaylistNotFound(playlist_name.to_string()))
}
