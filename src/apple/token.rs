//! Apple Music web token acquisition.
//!
//! The catalog API is called with the same short-lived bearer token the Apple
//! Music web player uses. There is no endpoint for it; the token is embedded,
//! URL-encoded, in a `<meta>` attribute of the web player's HTML and has to be
//! sliced out of the page.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

use crate::{Error, Res, config, types::WebPlayerEnvironment};

/// Attribute that precedes the encoded environment document.
pub const TOKEN_MARKER: &str = r#"name="desktop-music-app/config/environment""#;

/// End of the attribute value that holds the environment document.
pub const TOKEN_DELIMITER: &str = "\">";

/// How long a scraped token is reused before it is fetched again.
pub const TOKEN_TTL: Duration = Duration::from_secs(60);

/// Length of ` content="` between the marker and the encoded document.
const PAYLOAD_OFFSET: usize = 10;

const USER_AGENT: &str = concat!("myplycli/", env!("CARGO_PKG_VERSION"));

/// Source of the embedded web token.
///
/// Production code scrapes the live web player page, tests substitute a
/// canned implementation.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_embedded_token(
        &self,
        page_url: &str,
        marker: &str,
        delimiter: &str,
    ) -> Res<String>;
}

/// Scrapes the token from the Apple Music web player page.
pub struct WebPageTokenSource {
    http_client: Client,
}

impl WebPageTokenSource {
    pub fn new() -> Self {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { http_client }
    }
}

impl Default for WebPageTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenSource for WebPageTokenSource {
    async fn fetch_embedded_token(
        &self,
        page_url: &str,
        marker: &str,
        delimiter: &str,
    ) -> Res<String> {
        let response = self.http_client.get(page_url).send().await?;
        let response = Error::check_response("Apple Music", response).await?;
        let body = response.text().await?;

        extract_embedded_token(&body, marker, delimiter)
    }
}

/// Pulls `MEDIA_API.token` out of a web player page.
///
/// Takes the text after the first `marker`, cuts it at the first `delimiter`,
/// drops the attribute prefix, URL-decodes the rest and reads it as JSON.
///
/// # Errors
///
/// Returns [`Error::Scrape`] if any of those steps fails, which means the page
/// layout changed.
pub fn extract_embedded_token(body: &str, marker: &str, delimiter: &str) -> Res<String> {
    let (_, after_marker) = body
        .split_once(marker)
        .ok_or_else(|| Error::Scrape(format!("marker {} not found", marker)))?;

    let (attribute, _) = after_marker
        .split_once(delimiter)
        .ok_or_else(|| Error::Scrape(format!("delimiter {} not found", delimiter)))?;

    let encoded = attribute
        .get(PAYLOAD_OFFSET..)
        .ok_or_else(|| Error::Scrape("environment attribute is too short".to_string()))?;

    let decoded = urlencoding::decode(encoded)
        .map_err(|e| Error::Scrape(format!("cannot decode environment: {}", e)))?;

    let environment: WebPlayerEnvironment = serde_json::from_str(&decoded)
        .map_err(|e| Error::Scrape(format!("cannot parse environment: {}", e)))?;

    Ok(environment.media_api.token)
}

/// A value that is only handed out until its deadline passes.
#[derive(Debug, Clone)]
pub struct CachedValue<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CachedValue<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// The value, or `None` once it has expired.
    pub fn get(&self) -> Option<&T> {
        if self.is_expired() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Hands out the Apple Music web token, fetching it at most once per TTL.
///
/// Concurrent callers that miss the cache wait for the single in-flight fetch
/// instead of starting their own.
pub struct TokenProvider {
    source: Arc<dyn TokenSource>,
    page_url: String,
    ttl: Duration,
    cache: Mutex<Option<CachedValue<String>>>,
}

impl TokenProvider {
    pub fn new(source: Arc<dyn TokenSource>, page_url: impl Into<String>) -> Self {
        Self {
            source,
            page_url: page_url.into(),
            ttl: TOKEN_TTL,
            cache: Mutex::new(None),
        }
    }

    /// Scrapes the page configured by `APPLE_MUSIC_PAGE_URL`.
    pub fn from_env() -> Self {
        Self::new(
            Arc::new(WebPageTokenSource::new()),
            config::apple_music_page_url(),
        )
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn get_token(&self) -> Res<String> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.as_ref().and_then(CachedValue::get) {
            debug!("reusing cached Apple Music web token");
            return Ok(token.clone());
        }

        debug!(page = %self.page_url, "fetching Apple Music web token");
        let token = self
            .source
            .fetch_embedded_token(&self.page_url, TOKEN_MARKER, TOKEN_DELIMITER)
            .await?;

        *cache = Some(CachedValue::new(token.clone(), self.ttl));
        Ok(token)
    }
}
