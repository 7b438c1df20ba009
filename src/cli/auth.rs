use crate::{config::Credentials, spotify};

/// Runs the authorization flow even when a token is already cached.
pub async fn auth(credentials: &Credentials) -> spotify::Result<()> {
    spotify::auth::authorize(credentials).await?;
    Ok(())
}
