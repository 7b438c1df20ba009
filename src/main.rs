use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        NonEmptyStringValueParser, Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotlist::{
    cli,
    config::{self, Credentials},
    error,
    spotify::{SpotifyClient, SpotifyError},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Create a new Spotify playlist
    CreatePlaylist(CreatePlaylistOptions),

    /// Add songs from a file to a playlist, skipping tracks already in it
    AddSongs(AddSongsOptions),

    /// Remove duplicate songs from a playlist
    Cleanup(CleanupOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CreatePlaylistOptions {
    #[clap(value_parser = NonEmptyStringValueParser::new())]
    playlist_name: String,

    /// Playlist description [default: "A playlist created via CLI"]
    #[clap(long)]
    description: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddSongsOptions {
    #[clap(value_parser = NonEmptyStringValueParser::new())]
    playlist_name: String,

    /// Text file with one search query per line, `-` for stdin
    songs_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CleanupOptions {
    #[clap(value_parser = NonEmptyStringValueParser::new())]
    playlist_name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn connect() -> Result<SpotifyClient, SpotifyError> {
    SpotifyClient::connect(Credentials::from_env()?).await
}

async fn run(command: Command) -> Result<(), SpotifyError> {
    match command {
        Command::Auth => cli::auth(&Credentials::from_env()?).await,
        Command::CreatePlaylist(opt) => {
            let client = connect().await?;
            cli::create_playlist(&client, &opt.playlist_name, opt.description.as_deref()).await?;
            Ok(())
        }
        Command::AddSongs(opt) => {
            // an unreadable songs file fails before anything touches Spotify
            let songs = cli::read_song_queries(&opt.songs_file).await?;
            let client = connect().await?;
            cli::add_songs(&client, &opt.playlist_name, &songs).await?;
            Ok(())
        }
        Command::Cleanup(opt) => {
            let client = connect().await?;
            cli::cleanup(&client, &opt.playlist_name).await?;
            Ok(())
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // completion scripts go to stdout and must not carry status lines
    if !matches!(cli.command, Command::Completions(_)) {
        match config::load_env().await {
            Ok(Some(msg)) => warning!("{}", msg),
            Ok(None) => {}
            Err(e) => error!("Cannot load environment. Err: {}", e),
        }
    }

    if let Err(e) = run(cli.command).await {
        if e.is_fatal() {
            error!("{}", e);
        }
        warning!("{}", e);
    }
}
