//! Playlist Matching Adaptor Library
//!
//! This library moves playlists between Spotify and the Apple Music catalog.
//! It reads a Spotify playlist, looks every track up in the Apple Music
//! catalog with a fuzzy text search, and can publish a list of tracks back to
//! Spotify as a new playlist.
//!
//! # Modules
//!
//! - `adaptor` - Orchestration of the three outward-facing operations
//! - `apple` - Apple Music token scraping, catalog search and track matching
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error type
//! - `management` - Token lifecycle management for the Spotify API
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use myplycli::{adaptor::SpotifyAdaptor, config};
//!
//! #[tokio::main]
//! async fn main() -> myplycli::Res<()> {
//!     config::load_env().await?;
//!     let adaptor = SpotifyAdaptor::from_env()?;
//!     let playlist = adaptor
//!         .get_playlist_content("https://open.spotify.com/playlist/37i9dQZF1DX9tPFwDMOaN1")
//!         .await?;
//!     println!("{} tracks", playlist.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod adaptor;
pub mod apple;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod spotify;
pub mod types;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`Error`], so callers can
/// tell a transport failure apart from a scraping failure or a bad playlist
/// URL. A missing catalog match is not an error and is reported as
/// `Ok(None)` by the matching functions.
///
/// # Example
///
/// ```
/// use myplycli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
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
/// # Example
///
/// ```
/// success!("Matched {} of {} tracks", matched, total);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the command-line layer. Library code returns [`Error`]
/// instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
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
/// # Example
///
/// ```
/// warning!("No Apple Music match for {}", title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
