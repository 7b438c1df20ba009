//! # API Module
//!
//! HTTP handlers served by the local callback server during authorization.
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization page,
//!   validates the `state` value and exchanges the code for a token.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotlist::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback));
//! ```

mod callback;

pub use callback::callback;
