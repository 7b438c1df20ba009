use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::sync::Mutex;

use super::{Result, SpotifyError, client::parse_response};
use crate::{
    config::{self, Credentials},
    info,
    management::TokenManager,
    server::{bind_callback_listener, start_api_server},
    success,
    types::{PendingAuth, Token, TokenResponse},
    utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the OAuth 2.0 authorization-code flow and caches the resulting token.
///
/// 1. Generates a random `state` value for the request
/// 2. Binds the local callback server on the redirect URI's address
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
/// 5. Persists the token for later runs
///
/// If the browser cannot be opened the URL is printed instead. The flow gives
/// up after two minutes without a callback.
pub async fn authorize(credentials: &Credentials) -> Result<TokenManager> {
    let state = utils::generate_state();
    let shared_state = Arc::new(Mutex::new(PendingAuth {
        state: state.clone(),
        credentials: credentials.clone(),
        accounts_url: config::accounts_url(),
        token: None,
        error: None,
    }));

    let addr = config::callback_addr()?;
    let listener = bind_callback_listener(addr).await.map_err(|e| {
        SpotifyError::Auth(format!("Cannot listen for the callback on {}: {}", addr, e))
    })?;

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(credentials, &state)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let token = wait_for_token(shared_state).await;
    server.abort();
    let token = token?;

    let token_manager = TokenManager::new(token);
    token_manager.persist().await?;
    success!("Authentication successful!");

    Ok(token_manager)
}

/// Builds the accounts authorization URL for the given `state`.
pub fn authorize_url(credentials: &Credentials, state: &str) -> Result<Url> {
    let base = format!("{}/authorize", config::accounts_url());
    Url::parse_with_params(
        &base,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::REDIRECT_URI),
            ("scope", config::SCOPE),
            ("state", state),
        ],
    )
    .map_err(|e| SpotifyError::Config(format!("Invalid accounts URL {}: {}", base, e)))
}

/// Polls the shared state until the callback stored a token or an error.
async fn wait_for_token(shared_state: Arc<Mutex<PendingAuth>>) -> Result<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = &lock.token {
                return Ok(token.clone());
            }
            if let Some(error) = &lock.error {
                return Err(SpotifyError::Auth(error.clone()));
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(SpotifyError::Auth(
        "No authorization callback received in time".to_string(),
    ))
}

/// Exchanges an authorization code for a token at the given accounts service.
pub async fn exchange_code(
    accounts_url: &str,
    credentials: &Credentials,
    code: &str,
) -> Result<Token> {
    let response = request_token(
        accounts_url,
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config::REDIRECT_URI),
        ],
    )
    .await?;

    Ok(Token::from_response(response, ""))
}

/// Trades a refresh token for a fresh access token.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Result<Token> {
    let response = request_token(
        &config::accounts_url(),
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    Ok(Token::from_response(response, refresh_token))
}

async fn request_token(
    accounts_url: &str,
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<TokenResponse> {
    let url = format!("{}/api/token", accounts_url.trim_end_matches('/'));
    log::debug!("POST {}", url);

    let response = Client::new()
        .post(&url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(form)
        .send()
        .await?;

    parse_response(response).await.map_err(|e| match e {
        SpotifyError::Api { message, .. } => SpotifyError::Auth(message),
        other => other,
    })
}
