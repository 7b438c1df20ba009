use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify::auth::exchange_code, types::PendingAuth, warning};

/// Handles the redirect from the Spotify authorization page.
///
/// Checks `state` against the pending authorization, then exchanges `code`
/// for a token. The lock is not held during the exchange so the waiting flow
/// keeps polling and its timeout still applies. The outcome is stored in the
/// shared state.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<PendingAuth>>>,
) -> Html<&'static str> {
    let (credentials, accounts_url) = {
        let mut pending = shared_state.lock().await;

        if params.get("state") != Some(&pending.state) {
            return Html("<h4>Invalid authorization state.</h4>");
        }

        if let Some(error) = params.get("error") {
            pending.error = Some(format!("Authorization denied: {}", error));
            return Html("<h4>Authorization denied.</h4>");
        }

        (pending.credentials.clone(), pending.accounts_url.clone())
    };

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let exchanged = exchange_code(&accounts_url, &credentials, code).await;

    let mut pending = shared_state.lock().await;
    match exchanged {
        Ok(token) => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
