use super::find_playlist;
use crate::{
    spotify::{PlaylistService, Result},
    success,
    types::CleanupSummary,
    utils,
};

/// Removes repeated tracks from a playlist.
///
/// Every occurrence after the first is flagged. The flagged ids go to
/// Spotify's remove endpoint, which drops all occurrences of a track, so the
/// first copy of a flagged track is removed as well.
pub async fn cleanup(service: &dyn PlaylistService, playlist_name: &str) -> Result<CleanupSummary> {
    let playlist = find_playlist(service, playlist_name).await?;
    let tracks = service.playlist_tracks(&playlist.id).await?;

    let duplicates = utils::duplicate_track_ids(&tracks);

    if duplicates.is_empty() {
        success!("No duplicates found, playlist is clean!");
    } else {
        service
            .remove_all_occurrences(&playlist.id, &duplicates)
            .await?;
        success!(
            "Removed {} duplicate songs from '{}'!",
            duplicates.len(),
            playlist_name
        );
    }

    Ok(CleanupSummary { duplicates })
}
