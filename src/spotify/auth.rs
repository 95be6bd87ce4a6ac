use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    Error, Res, config,
    types::{Token, TokenResponse},
};

/// Client credentials plus the long-lived refresh token of the account that
/// owns generated playlists.
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl SpotifyCredentials {
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
            refresh_token: config::spotify_refresh_token()?,
        })
    }

    /// Value of the `Authorization` header for the token endpoint.
    pub fn basic_auth_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", encoded)
    }
}

/// Exchanges the refresh token for a fresh access token.
///
/// Spotify may omit `refresh_token`, `scope` and `expires_in` in the answer;
/// the refresh token sent is kept and the lifetime defaults to one hour.
pub async fn refresh_token(
    client: &Client,
    token_url: &str,
    credentials: &SpotifyCredentials,
) -> Res<Token> {
    let res = client
        .post(token_url)
        .header("Authorization", credentials.basic_auth_header())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.as_str()),
        ])
        .send()
        .await?;

    let res = Error::check_response("Spotify accounts", res).await?;
    let json = res.json::<TokenResponse>().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json
            .refresh_token
            .unwrap_or_else(|| credentials.refresh_token.clone()),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
