use crate::{
    config, info,
    spotify::{PlaylistService, Result},
    success,
    types::CreatedPlaylist,
    warning,
};

/// Creates a public playlist for the current user and reports its link.
///
/// Without a description, [`config::DEFAULT_DESCRIPTION`] is sent.
pub async fn create_playlist(
    service: &dyn PlaylistService,
    playlist_name: &str,
    description: Option<&str>,
) -> Result<CreatedPlaylist> {
    let description = description.unwrap_or(config::DEFAULT_DESCRIPTION);

    let user_id = service.current_user_id().await?;
    let playlist = service
        .create_playlist(&user_id, playlist_name, description, true)
        .await?;

    success!("Playlist '{}' created successfully!", playlist_name);
    match playlist.link() {
        Some(link) => info!("Link: {}", link),
        None => warning!("Spotify returned no link for playlist {}", playlist.id),
    }

    Ok(playlist)
}
