use async_trait::async_trait;
use reqwest::Client;

use crate::{
    Error, Res, config,
    types::{CatalogSearchResponse, CatalogSong},
};

/// The catalog API rejects requests that do not come from the web player.
const ORIGIN: &str = "https://music.apple.com";

/// Free-text song search against a music catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// First song the catalog returns for `term`, if any.
    async fn search_song(&self, token: &str, term: &str) -> Res<Option<CatalogSong>>;
}

/// Apple Music catalog API client.
pub struct AppleMusicClient {
    http_client: Client,
    base_url: String,
    storefront: String,
    language: String,
}

impl AppleMusicClient {
    /// Client configured from `APPLE_MUSIC_API_URL`, `APPLE_MUSIC_STOREFRONT`
    /// and `APPLE_MUSIC_LANGUAGE`.
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: config::apple_music_apiurl(),
            storefront: config::apple_music_storefront(),
            language: config::apple_music_language(),
        }
    }

    /// Client against a custom base URL, using the default `kr` storefront.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            storefront: config::DEFAULT_APPLE_MUSIC_STOREFRONT.to_string(),
            language: config::DEFAULT_APPLE_MUSIC_LANGUAGE.to_string(),
        }
    }

    pub fn storefront(mut self, storefront: impl Into<String>, language: impl Into<String>) -> Self {
        self.storefront = storefront.into();
        self.language = language.into();
        self
    }

    async fn send_search_request(&self, token: &str, term: &str) -> Res<CatalogSearchResponse> {
        let url = format!(
            "{base}/catalog/{storefront}/search",
            base = self.base_url,
            storefront = self.storefront
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .header("Origin", ORIGIN)
            .query(&[
                ("term", term),
                ("l", self.language.as_str()),
                ("types", "songs"),
            ])
            .send()
            .await?;

        let response = Error::check_response("Apple Music", response).await?;
        Ok(response.json::<CatalogSearchResponse>().await?)
    }
}

impl Default for AppleMusicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSearch for AppleMusicClient {
    async fn search_song(&self, token: &str, term: &str) -> Res<Option<CatalogSong>> {
        let response = self.send_search_request(token, term).await?;

        Ok(response
            .results
            .songs
            .and_then(|page| page.data.into_iter().next()))
    }
}
