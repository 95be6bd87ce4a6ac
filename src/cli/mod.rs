//! # CLI Module
//!
//! The command-line layer of myplycli. Each command builds the pieces it needs
//! from the environment, drives one adaptor operation, and reports progress
//! and results with the crate's output macros.
//!
//! ## Commands
//!
//! - [`match_song`] - Looks a single artist/title up in the Apple Music catalog
//! - [`find_song`] - Looks a single artist/title up on Spotify
//! - [`translate`] - Prints a Spotify playlist with its Apple Music matches
//! - [`generate`] - Translates a playlist and publishes the result as a new
//!   Spotify playlist
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Adaptor Layer (find / generate / translate)
//!     ↓
//! Service Layer (Spotify client, Apple Music match engine)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Fatal failures are reported with `error!`, which exits with status 1.

mod matching;
mod playlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use matching::find_song;
pub use matching::match_song;
pub use playlist::TranslateOptions;
pub use playlist::generate;
pub use playlist::translate;

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
