use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{Playlist, Track};

/// Random value sent as OAuth `state` and checked on the callback.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// First playlist whose name equals `name` exactly.
pub fn find_playlist_by_name<'a>(playlists: &'a [Playlist], name: &str) -> Option<&'a Playlist> {
    playlists.iter().find(|p| p.name == name)
}

/// Ids of the tracks already in a playlist. Tracks without an id are ignored.
pub fn existing_track_ids(tracks: &[Track]) -> HashSet<String> {
    tracks.iter().filter_map(|t| t.id.clone()).collect()
}

/// Ids of every occurrence after the first one, in playlist order.
///
/// For `[A, B, A, C, B]` this yields `[A, B]`.
pub fn duplicate_track_ids(tracks: &[Track]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in tracks.iter().filter_map(|t| t.id.as_deref()) {
        if !seen.insert(id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}

/// Song queries from the contents of a songs file, one per non-blank line.
pub fn parse_song_queries(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
