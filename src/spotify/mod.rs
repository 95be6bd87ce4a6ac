//! # Spotify Integration Module
//!
//! This module is the thin layer between the adaptor and the Spotify Web API.
//! It handles authentication with a refresh token, track search, and reading
//! and writing playlists.
//!
//! ## Architecture
//!
//! ```text
//! Adaptor Layer (SpotifyAdaptor)
//!          ↓
//! Spotify Integration Layer (SpotifyClient)
//!     ├── Authentication (refresh-token grant, Basic client auth)
//!     ├── Search (first track for a free-text query)
//!     └── Playlist Operations (read with pagination, create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] - Playlists are created on behalf of one master account. Its
//! refresh token is configured once, and every access token is obtained with
//! the `refresh_token` grant, authenticated with
//! `Basic base64(client_id:client_secret)`. Access tokens are held by
//! [`crate::management::TokenManager`] and refreshed four minutes before they
//! expire.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Refresh-token exchange
//! - `GET /search` - Track search
//! - `GET /playlists/{id}` - Playlist contents, following `tracks.next`
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks, 100 per request
//!
//! ## Error Types
//!
//! Every call returns [`crate::Res`]. Network failures surface as
//! [`crate::Error::Transport`], non-success statuses as [`crate::Error::Api`].
//! Nothing is retried.

pub mod auth;
pub mod playlist;
pub mod search;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{Res, config, management::TokenManager};

pub use auth::SpotifyCredentials;

/// Spotify Web API client acting as the master account.
pub struct SpotifyClient {
    http_client: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(
        credentials: SpotifyCredentials,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            api_url: api_url.into(),
            tokens: Mutex::new(TokenManager::new(credentials, token_url)),
        }
    }

    /// Client configured from the `SPOTIFY_*` environment variables.
    pub fn from_env() -> Res<Self> {
        Ok(Self::new(
            SpotifyCredentials::from_env()?,
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
        ))
    }

    async fn access_token(&self) -> Res<String> {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.http_client).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }
}
