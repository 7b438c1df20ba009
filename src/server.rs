use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, types::PendingAuth};

/// Binds the callback listener up front so a busy port fails the flow at once.
pub async fn bind_callback_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

pub async fn start_api_server(listener: TcpListener, state: Arc<Mutex<PendingAuth>>) -> Res<()> {
    let app = Router::new().route("/callback", get(api::callback).layer(Extension(state)));

    log::debug!("Callback server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
