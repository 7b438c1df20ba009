use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::Credentials,
    spotify::{Result, SpotifyError, auth},
    types::Token,
};

/// Seconds before the real expiry at which a token is already refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the cached OAuth token and keeps it fresh.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and re-persisting it when it is
    /// about to expire.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> Result<String> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                return Err(SpotifyError::Auth(
                    "Token expired and no refresh token is cached. Please run spotlist auth"
                        .to_string(),
                ));
            }

            log::debug!("Access token expired, refreshing");
            self.token = auth::refresh_token(credentials, &self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotlist/cache/token.json");
        path
    }
}
