use chrono::Utc;
use reqwest::Client;
use tracing::debug;

use crate::{
    Res,
    spotify::auth::{SpotifyCredentials, refresh_token},
    types::Token,
};

/// Seconds before the reported expiry at which a token is already treated as
/// expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Keeps the Spotify access token of the master account and refreshes it
/// when it is about to run out. Tokens live in memory only.
pub struct TokenManager {
    credentials: SpotifyCredentials,
    token_url: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(credentials: SpotifyCredentials, token_url: impl Into<String>) -> Self {
        TokenManager {
            credentials,
            token_url: token_url.into(),
            token: None,
        }
    }

    pub async fn get_valid_token(&mut self, client: &Client) -> Res<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !is_expired(t)) {
            return Ok(token.access_token.clone());
        }

        debug!("refreshing Spotify access token");
        let token = refresh_token(client, &self.token_url, &self.credentials).await?;
        self.credentials.refresh_token = token.refresh_token.clone();
        let access_token = token.access_token.clone();
        self.token = Some(token);

        Ok(access_token)
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now >= (token.obtained_at + token.expires_in).saturating_sub(EXPIRY_MARGIN_SECS)
}
