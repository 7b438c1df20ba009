use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while talking to Spotify or preparing a command.
///
/// Every variant except [`SpotifyError::PlaylistNotFound`] is fatal: the
/// dispatcher prints it and exits with a non-zero status. A missing playlist
/// is reported as a warning and the command still completes normally.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Missing or invalid configuration, e.g. unset client credentials.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The OAuth flow failed, timed out, or the token could not be refreshed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network, TLS or body decoding failure inside reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Spotify answered with a non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Reading the songs file, the token cache or the `.env` file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The token cache could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A chunked add or remove failed after earlier chunks were applied.
    #[error("Only {committed} of {total} tracks were updated before the request failed: {source}")]
    PartialWrite {
        committed: usize,
        total: usize,
        source: Box<SpotifyError>,
    },

    /// No playlist of the caller has exactly this name.
    #[error("Playlist '{0}' not found!")]
    PlaylistNotFound(String),
}

impl SpotifyError {
    /// Whether the error should terminate the process with a failure status.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SpotifyError::PlaylistNotFound(_))
    }

    /// Wraps the error of a failed chunk, unless nothing was applied yet.
    pub fn partial_write(committed: usize, total: usize, source: SpotifyError) -> Self {
        if committed == 0 {
            return source;
        }

        SpotifyError::PartialWrite {
            committed,
            total,
            source: Box::new(source),
        }
    }

    /// Builds an [`SpotifyError::Api`] from a failed response body.
    ///
    /// Spotify wraps errors as `{"error": {"status": 404, "message": "..."}}`;
    /// the accounts service uses `{"error": "...", "error_description": "..."}`.
    /// Anything else falls back to the raw body or the status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ApiErrorBody {
            error: ApiErrorDetail,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ApiErrorDetail {
            Object { message: String },
            Code(String),
        }

        #[derive(Deserialize)]
        struct AccountsErrorBody {
            error_description: String,
        }

        let message = if let Ok(accounts) = serde_json::from_str::<AccountsErrorBody>(body) {
            accounts.error_description
        } else {
            match serde_json::from_str::<ApiErrorBody>(body) {
                Ok(ApiErrorBody {
                    error: ApiErrorDetail::Object { message },
                }) => message,
                Ok(ApiErrorBody {
                    error: ApiErrorDetail::Code(code),
                }) => code,
                Err(_) if !body.trim().is_empty() => body.trim().to_string(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            }
        };

        SpotifyError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpotifyError>;
