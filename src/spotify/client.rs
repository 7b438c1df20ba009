use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use super::{PlaylistService, Result, SpotifyError, auth};
use crate::{
    config::{self, Credentials},
    info,
    management::TokenManager,
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatedPlaylist, CurrentUser, Page, Playlist,
        PlaylistItem, RemoveTracksRequest, SearchResponse, SnapshotResponse, Track, TrackUri,
    },
    utils,
};

/// Spotify accepts at most 100 items per add or remove request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

const PLAYLISTS_PAGE_LIMIT: u32 = 50;
const TRACKS_PAGE_LIMIT: u32 = 100;

/// Authenticated Spotify Web API client.
///
/// Holds the token manager behind an async mutex so an expired token can be
/// refreshed from `&self` methods.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, token_manager: TokenManager) -> Self {
        Self::with_api_url(credentials, token_manager, config::api_url())
    }

    /// Creates a client talking to an explicit Web API base URL.
    pub fn with_api_url(
        credentials: Credentials,
        token_manager: TokenManager,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
            tokens: Mutex::new(token_manager),
        }
    }

    /// Creates a client from the cached token, running the authorization
    /// flow first when no token is cached yet.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        let token_manager = match TokenManager::load().await {
            Ok(manager) => manager,
            Err(e) => {
                log::debug!("No usable cached token: {}", e);
                info!("No cached token found, starting Spotify authorization...");
                auth::authorize(&credentials).await?
            }
        };

        Ok(Self::new(credentials, token_manager))
    }

    async fn access_token(&self) -> Result<String> {
        self.tokens
            .lock()
            .await
            .get_valid_token(&self.credentials)
            .await
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let url = format!("{}{}", self.api_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&url)
        } else {
            Url::parse_with_params(&url, params)
        };
        parsed.map_err(|e| SpotifyError::Config(format!("Invalid API URL {}: {}", url, e)))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!("GET {}", url);
        let token = self.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        parse_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        log::debug!("{} {}", method, url);
        let token = self.access_token().await?;
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Collects every page of a paging object by following `next` links.
    async fn get_all<T: DeserializeOwned>(&self, first: Url, message: &str) -> Result<Vec<T>> {
        let pb = utils::spinner(message);
        let mut items = Vec::new();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            let page: Page<T> = match self.get(url).await {
                Ok(page) => page,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            };
            items.extend(page.items);
            next = match page.next {
                Some(link) => Some(Url::parse(&link).map_err(|e| {
                    SpotifyError::Config(format!("Invalid paging link {}: {}", link, e))
                })?),
                None => None,
            };
        }

        pb.finish_and_clear();
        Ok(items)
    }
}

pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::debug!("Request failed with {}: {}", status, body);
        return Err(SpotifyError::from_response(status, &body));
    }

    Ok(response.json::<T>().await?)
}

#[async_trait]
impl PlaylistService for SpotifyClient {
    async fn current_user_id(&self) -> Result<String> {
        let user: CurrentUser = self.get(self.endpoint("/me", &[])?).await?;
        Ok(user.id)
    }

    async fn user_playlists(&self, user_id: &str) -> Result<Vec<Playlist>> {
        let limit = PLAYLISTS_PAGE_LIMIT.to_string();
        let url = self.endpoint(
            &format!("/users/{}/playlists", user_id),
            &[("limit", limit.as_str())],
        )?;
        self.get_all(url, "Fetching playlists...").await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        let url = self.endpoint(&format!("/users/{}/playlists", user_id), &[])?;
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };
        self.send_json(Method::POST, url, &body).await
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let limit = TRACKS_PAGE_LIMIT.to_string();
        let url = self.endpoint(
            &format!("/playlists/{}/tracks", playlist_id),
            &[
                ("limit", limit.as_str()),
                ("fields", "items(track(id,name,uri)),next"),
            ],
        )?;
        let items: Vec<PlaylistItem> = self.get_all(url, "Fetching playlist tracks...").await?;
        Ok(items.into_iter().filter_map(|item| item.track).collect())
    }

    async fn search_track(&self, query: &str) -> Result<Option<Track>> {
        let url = self.endpoint(
            "/search",
            &[("q", query), ("type", "track"), ("limit", "1")],
        )?;
        let response: SearchResponse = self.get(url).await?;
        Ok(response.tracks.items.into_iter().next())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let mut committed = 0;
        for chunk in uris.chunks(MAX_ITEMS_PER_REQUEST) {
            let url = self.endpoint(&format!("/playlists/{}/tracks", playlist_id), &[])?;
            let body = AddTracksRequest {
                uris: chunk.to_vec(),
            };
            let snapshot: SnapshotResponse = self
                .send_json(Method::POST, url, &body)
                .await
                .map_err(|e| SpotifyError::partial_write(committed, uris.len(), e))?;
            committed += chunk.len();
            log::debug!("Playlist {} snapshot {}", playlist_id, snapshot.snapshot_id);
        }
        Ok(())
    }

    async fn remove_all_occurrences(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let mut committed = 0;
        for chunk in track_ids.chunks(MAX_ITEMS_PER_REQUEST) {
            let url = self.endpoint(&format!("/playlists/{}/tracks", playlist_id), &[])?;
            let body = RemoveTracksRequest {
                tracks: chunk
                    .iter()
                    .map(|id| TrackUri {
                        uri: utils::track_uri(id),
                    })
                    .collect(),
            };
            let snapshot: SnapshotResponse = self
                .send_json(Method::DELETE, url, &body)
                .await
                .map_err(|e| SpotifyError::partial_write(committed, track_ids.len(), e))?;
            committed += chunk.len();
            log::debug!("Playlist {} snapshot {}", playlist_id, snapshot.snapshot_id);
        }
        Ok(())
    }
}
