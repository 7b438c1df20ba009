use std::path::Path;

use tokio::io::AsyncReadExt;

use super::find_playlist;
use crate::{
    info,
    spotify::{PlaylistService, Result, SpotifyError},
    success,
    types::{AddSongsSummary, SongOutcome, SongReport, Track},
    utils, warning,
};

/// Reads song queries from a file, or from stdin when the path is `-`.
pub async fn read_song_queries(path: &Path) -> Result<Vec<String>> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        async_fs::read_to_string(path).await.map_err(|e| {
            SpotifyError::Io(std::io::Error::new(
                e.kind(),
                format!("Cannot read {}: {}", path.display(), e),
            ))
        })?
    };

    Ok(utils::parse_song_queries(&contents))
}

/// Searches every song and appends the ones not yet in the playlist.
///
/// Each query takes the top search result. Tracks already in the playlist,
/// or matched by an earlier line, are skipped. A failed search is reported
/// and the remaining lines are still processed. New tracks are submitted in
/// one batch at the end.
pub async fn add_songs(
    service: &dyn PlaylistService,
    playlist_name: &str,
    songs: &[String],
) -> Result<AddSongsSummary> {
    let playlist = find_playlist(service, playlist_name).await?;
    let tracks = service.playlist_tracks(&playlist.id).await?;
    let mut existing = utils::existing_track_ids(&tracks);

    let mut summary = AddSongsSummary::default();

    for line in songs {
        let song = line.trim();
        if song.is_empty() {
            continue;
        }

        let outcome = match service.search_track(song).await {
            Ok(Some(Track {
                id: Some(id), uri, ..
            })) => {
                if existing.contains(&id) {
                    warning!("Skipped (already in playlist): {}", song);
                    SongOutcome::Skipped
                } else {
                    summary.added_uris.push(uri);
                    existing.insert(id);
                    info!("Added: {}", song);
                    SongOutcome::Added
                }
            }
            Ok(_) => {
                warning!("Not found: {}", song);
                SongOutcome::NotFound
            }
            Err(e) => {
                warning!("Search failed for {}: {}", song, e);
                SongOutcome::Failed(e.to_string())
            }
        };

        summary.reports.push(SongReport {
            query: song.to_string(),
            outcome,
        });
    }

    if summary.added_uris.is_empty() {
        info!("No new songs to add!");
    } else {
        service
            .add_tracks(&playlist.id, &summary.added_uris)
            .await?;
        success!(
            "Added {} new songs to '{}'!",
            summary.added_uris.len(),
            playlist_name
        );
    }

    Ok(summary)
}
