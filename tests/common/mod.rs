#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use spotlist::{
    config::Credentials,
    spotify::{PlaylistService, Result, SpotifyError},
    types::{CreatedPlaylist, Playlist, PlaylistOwner, Token, Track},
    utils::track_uri,
};

/// A call received by [`FakeService`], recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    UserPlaylists(String),
    CreatePlaylist {
        user_id: String,
        name: String,
        description: String,
        public: bool,
    },
    PlaylistTracks(String),
    Search(String),
    AddTracks(String, Vec<String>),
    RemoveAllOccurrences(String, Vec<String>),
}

/// In-memory stand-in for Spotify that applies adds and removes to its own
/// playlist contents.
pub struct FakeService {
    user_id: String,
    playlists: Vec<Playlist>,
    contents: Mutex<HashMap<String, Vec<Track>>>,
    catalog: HashMap<String, Track>,
    failing_queries: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

pub fn track(id: &str) -> Track {
    Track {
        id: Some(id.to_string()),
        name: format!("Song {}", id),
        uri: track_uri(id),
    }
}

pub fn local_track(name: &str) -> Track {
    Track {
        id: None,
        name: name.to_string(),
        uri: format!("spotify:local:::{}:180", name),
    }
}

pub fn songs(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

pub fn credentials() -> Credentials {
    Credentials::from_vars(Some("client-id".to_string()), Some("client-secret".to_string()))
        .unwrap()
}

/// A token that stays valid for the whole test run.
pub fn fresh_token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: String::new(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Serves `router` on a random local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

impl FakeService {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            playlists: Vec::new(),
            contents: Mutex::new(HashMap::new()),
            catalog: HashMap::new(),
            failing_queries: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_playlist(self, id: &str, name: &str, track_ids: &[&str]) -> Self {
        let tracks = track_ids.iter().map(|t| track(t)).collect();
        self.with_playlist_tracks(id, name, tracks)
    }

    pub fn with_playlist_tracks(mut self, id: &str, name: &str, tracks: Vec<Track>) -> Self {
        self.playlists.push(Playlist {
            id: id.to_string(),
            name: name.to_string(),
            owner: PlaylistOwner {
                id: self.user_id.clone(),
            },
        });
        self.contents
            .get_mut()
            .unwrap()
            .insert(id.to_string(), tracks);
        self
    }

    pub fn with_song(self, query: &str, track_id: &str) -> Self {
        self.with_search_result(query, track(track_id))
    }

    pub fn with_search_result(mut self, query: &str, result: Track) -> Self {
        self.catalog.insert(query.to_string(), result);
        self
    }

    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn track_ids(&self, playlist_id: &str) -> Vec<String> {
        self.contents.lock().unwrap()[playlist_id]
            .iter()
            .filter_map(|t| t.id.clone())
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlaylistService for FakeService {
    async fn current_user_id(&self) -> Result<String> {
        self.record(Call::CurrentUser);
        Ok(self.user_id.clone())
    }

    async fn user_playlists(&self, user_id: &str) -> Result<Vec<Playlist>> {
        self.record(Call::UserPlaylists(user_id.to_string()));
        Ok(self.playlists.clone())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        self.record(Call::CreatePlaylist {
            user_id: user_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            public,
        });

        let id = format!("new-{}", name.to_lowercase().replace(' ', "-"));
        Ok(CreatedPlaylist {
            external_urls: HashMap::from([(
                "spotify".to_string(),
                format!("https://open.spotify.com/playlist/{}", id),
            )]),
            id,
            name: name.to_string(),
        })
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        self.record(Call::PlaylistTracks(playlist_id.to_string()));
        self.contents
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| SpotifyError::Api {
                status: 404,
                message: "Not found.".to_string(),
            })
    }

    async fn search_track(&self, query: &str) -> Result<Option<Track>> {
        self.record(Call::Search(query.to_string()));
        if self.failing_queries.contains(query) {
            return Err(SpotifyError::Api {
                status: 500,
                message: "Server error".to_string(),
            });
        }
        Ok(self.catalog.get(query).cloned())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.record(Call::AddTracks(playlist_id.to_string(), uris.to_vec()));
        let mut contents = self.contents.lock().unwrap();
        let tracks = contents.entry(playlist_id.to_string()).or_default();
        for uri in uris {
            let id = uri.trim_start_matches("spotify:track:");
            tracks.push(track(id));
        }
        Ok(())
    }

    async fn remove_all_occurrences(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.record(Call::RemoveAllOccurrences(
            playlist_id.to_string(),
            track_ids.to_vec(),
        ));
        let mut contents = self.contents.lock().unwrap();
        if let Some(tracks) = contents.get_mut(playlist_id) {
            tracks.retain(|t| t.id.as_ref().is_none_or(|id| !track_ids.contains(id)));
        }
        Ok(())
    }
}
