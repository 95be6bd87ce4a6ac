//! Configuration management for the playlist adaptor.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, Apple Music endpoints, and
//! matching parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{Error, Res};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_APPLE_MUSIC_PAGE_URL: &str = "https://music.apple.com/kr/search";
pub const DEFAULT_APPLE_MUSIC_API_URL: &str = "https://amp-api.music.apple.com/v1";
pub const DEFAULT_APPLE_MUSIC_STOREFRONT: &str = "kr";
pub const DEFAULT_APPLE_MUSIC_LANGUAGE: &str = "ko-kr";
pub const DEFAULT_MATCH_CONCURRENCY: usize = 8;

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist and loads variables
/// from a `.env` file located in the platform-specific local data directory
/// under `myplycli/.env`, followed by a `.env` in the working directory.
/// Variables that are already set in the process environment are never
/// overwritten, and a missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/myplycli/.env`
/// - macOS: `~/Library/Application Support/myplycli/.env`
/// - Windows: `%LOCALAPPDATA%/myplycli/.env`
///
/// # Errors
///
/// Returns [`Error::Config`] if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(format!("cannot create {}: {}", parent.display(), e)))?;
    }

    if path.is_file() {
        load_env_file(&path)?;
    }
    dotenv::dotenv().ok();

    Ok(())
}

/// Loads one `.env` file without overwriting variables that are already set.
pub fn load_env_file(path: &Path) -> Res<()> {
    dotenv::from_path(path)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))
}

/// Location of the user-level `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("myplycli/.env");
    path
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", name))),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// The client secret should be kept confidential and never exposed in logs.
pub fn spotify_client_secret() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the refresh token of the account that owns generated playlists
/// (`SPOTIFY_REFRESH_TOKEN`).
pub fn spotify_refresh_token() -> Res<String> {
    required("SPOTIFY_REFRESH_TOKEN")
}

/// Returns the Spotify user ID that generated playlists are created for
/// (`SPOTIFY_USER_ID`).
pub fn spotify_user() -> Res<String> {
    required("SPOTIFY_USER_ID")
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL)
}

/// Returns the page the Apple Music web token is scraped from
/// (`APPLE_MUSIC_PAGE_URL`).
pub fn apple_music_page_url() -> String {
    optional("APPLE_MUSIC_PAGE_URL", DEFAULT_APPLE_MUSIC_PAGE_URL)
}

/// Returns the Apple Music catalog API base URL (`APPLE_MUSIC_API_URL`).
pub fn apple_music_apiurl() -> String {
    optional("APPLE_MUSIC_API_URL", DEFAULT_APPLE_MUSIC_API_URL)
}

/// Returns the storefront catalog searches are scoped to
/// (`APPLE_MUSIC_STOREFRONT`).
pub fn apple_music_storefront() -> String {
    optional("APPLE_MUSIC_STOREFRONT", DEFAULT_APPLE_MUSIC_STOREFRONT)
}

/// Returns the response language of catalog searches (`APPLE_MUSIC_LANGUAGE`).
pub fn apple_music_language() -> String {
    optional("APPLE_MUSIC_LANGUAGE", DEFAULT_APPLE_MUSIC_LANGUAGE)
}

/// Returns how many catalog lookups may run at once while translating a
/// playlist (`MATCH_CONCURRENCY`).
///
/// # Errors
///
/// Returns [`Error::Config`] if the value is not a positive integer.
pub fn match_concurrency() -> Res<usize> {
    match env::var("MATCH_CONCURRENCY") {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(Error::Config(format!(
                "MATCH_CONCURRENCY must be a positive integer, got '{}'",
                raw
            ))),
        },
        _ => Ok(DEFAULT_MATCH_CONCURRENCY),
    }
}

/// Returns the tracing filter directives: `MYPLY_LOG` when set, otherwise
/// `myplycli=debug` for verbose runs and `warn` for everything else.
///
/// Only meaningful after [`load_env`], since `MYPLY_LOG` may live in a
/// `.env` file.
pub fn log_filter(verbose: bool) -> String {
    let default = if verbose { "myplycli=debug" } else { "warn" };
    optional("MYPLY_LOG", default)
}
