//! Spotify Playlist CLI Library
//!
//! Library side of the `spotlist` binary: creating Spotify playlists, adding
//! searched-for songs without duplicating tracks, and cleaning duplicate
//! tracks out of existing playlists.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command handlers behind the `spotlist` subcommands
//! - `config` - `.env` loading, credentials and endpoint configuration
//! - `management` - Token cache management
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client and the `PlaylistService` trait
//! - `types` - Wire types and command summaries
//! - `utils` - Pure helpers shared by the handlers
//!
//! # Example
//!
//! ```
//! use spotlist::{cli, config, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spotlist::spotify::SpotifyError> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::connect(config::Credentials::from_env()?).await?;
//!     cli::cleanup(&client, "Road Trip").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed error result used where errors only need to be displayed.
///
/// The callback server uses it because its failures come from several
/// unrelated sources (address parsing, socket binding, serving).
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Searching for {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// ```
/// success!("Playlist '{}' created successfully!", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits with status 1.
///
/// Only for fatal errors. Code after the macro does not run, so it can be
/// used in expression position where a value of any type is expected.
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for handled failures: songs that were not found, skipped tracks,
/// a missing playlist or a missing `.env` file.
///
/// ```
/// warning!("Not found: {}", song);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
