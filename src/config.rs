//! Configuration management for spotlist.
//!
//! Credentials come from environment variables, optionally loaded from a
//! `.env` file in the platform-specific local data directory:
//!
//! - Linux: `~/.local/share/spotlist/.env`
//! - macOS: `~/Library/Application Support/spotlist/.env`
//! - Windows: `%LOCALAPPDATA%/spotlist/.env`
//!
//! Variables already present in the environment take precedence over the file.

use std::{
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use reqwest::Url;

use crate::spotify::{Result, SpotifyError};

pub const CLIENT_ID_VAR: &str = "SPOTIPY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIPY_CLIENT_SECRET";

/// Callback registered in the Spotify application settings.
pub const REDIRECT_URI: &str = "http://localhost:8888/callback";

/// Scopes requested during authorization.
pub const SCOPE: &str = "playlist-modify-public playlist-read-private";

pub const DEFAULT_DESCRIPTION: &str = "A playlist created via CLI";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Loads the `.env` file from the local data directory.
///
/// Returns `Ok(Some(warning))` when the file does not exist; startup
/// continues in that case since the variables may be set in the environment.
///
/// ```
/// match config::load_env().await {
///     Ok(Some(warning)) => warning!("{}", warning),
///     Ok(None) => {}
///     Err(e) => error!("Cannot load environment. Err: {}", e),
/// }
/// ```
pub async fn load_env() -> Result<Option<String>> {
    load_env_from(&env_path()).await
}

/// Loads a `.env` file from an explicit path.
///
/// The parent directory is created so users find the place the file belongs;
/// failing to create it is not an error. A file that exists but cannot be
/// parsed is an error.
pub async fn load_env_from(path: &Path) -> Result<Option<String>> {
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            log::debug!("Cannot create {}: {}", parent.display(), e);
        }
    }

    if !path.is_file() {
        return Ok(Some(format!(
            ".env file not found at {}. Make sure {} and {} are set.",
            path.display(),
            CLIENT_ID_VAR,
            CLIENT_SECRET_VAR
        )));
    }

    dotenv::from_path(path).map_err(|e| {
        SpotifyError::Config(format!("Cannot load {}: {}", path.display(), e))
    })?;
    Ok(None)
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotlist/.env");
    path
}

/// Spotify application credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var(CLIENT_ID_VAR).ok(),
            env::var(CLIENT_SECRET_VAR).ok(),
        )
    }

    /// Builds credentials from optional values, rejecting missing or blank ones.
    pub fn from_vars(client_id: Option<String>, client_secret: Option<String>) -> Result<Self> {
        let required = |value: Option<String>, name: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SpotifyError::Config(format!("{} must be set", name)))
        };

        Ok(Self {
            client_id: required(client_id, CLIENT_ID_VAR)?,
            client_secret: required(client_secret, CLIENT_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Base URL of the Web API, overridable through `SPOTIFY_API_URL`.
pub fn api_url() -> String {
    env::var("SPOTIFY_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Base URL of the accounts service, overridable through `SPOTIFY_ACCOUNTS_URL`.
pub fn accounts_url() -> String {
    env::var("SPOTIFY_ACCOUNTS_URL")
        .unwrap_or_else(|_| DEFAULT_ACCOUNTS_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Socket address the callback server binds to, derived from [`REDIRECT_URI`].
pub fn callback_addr() -> Result<SocketAddr> {
    let url = Url::parse(REDIRECT_URI)
        .map_err(|e| SpotifyError::Config(format!("Invalid redirect URI: {}", e)))?;

    let ip = match url.host_str() {
        Some("localhost") | None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Some(host) => host
            .trim_matches(|c| c == '[' || c == ']')
            .parse()
            .map_err(|e| SpotifyError::Config(format!("Invalid redirect host {}: {}", host, e)))?,
    };
    let port = url.port_or_known_default().unwrap_or(80);

    Ok(SocketAddr::new(ip, port))
}
