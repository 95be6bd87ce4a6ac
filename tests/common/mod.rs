#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use myplycli::{
    Error, Res,
    apple::{CatalogSearch, MatchEngine, TokenProvider, TokenSource},
    spotify::{SpotifyClient, SpotifyCredentials},
    types::{CatalogSong, CatalogSongAttributes},
};
use reqwest::StatusCode;

/// Hands out `token-1`, `token-2`, ... and counts how often it was asked.
#[derive(Default)]
pub struct CountingTokenSource {
    fetches: AtomicUsize,
    fail: bool,
}

impl CountingTokenSource {
    pub fn failing() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for CountingTokenSource {
    async fn fetch_embedded_token(
        &self,
        _page_url: &str,
        _marker: &str,
        _delimiter: &str,
    ) -> Res<String> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(Error::Scrape("marker not found".to_string()));
        }
        Ok(format!("token-{}", n))
    }
}

/// In-memory catalog keyed by the exact search term.
#[derive(Default)]
pub struct FakeCatalog {
    songs: HashMap<String, CatalogSong>,
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_song(mut self, term: &str, id: &str, artist: &str, title: &str) -> Self {
        self.songs.insert(term.to_string(), catalog_song(id, artist, title));
        self
    }

    pub fn failing_on(mut self, term: &str) -> Self {
        self.failing.insert(term.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search_song(&self, _token: &str, term: &str) -> Res<Option<CatalogSong>> {
        self.queries.lock().unwrap().push(term.to_string());
        if self.failing.contains(term) {
            return Err(Error::Api {
                service: "Apple Music",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            });
        }
        Ok(self.songs.get(term).cloned())
    }
}

pub fn catalog_song(id: &str, artist: &str, title: &str) -> CatalogSong {
    CatalogSong {
        id: id.to_string(),
        attributes: CatalogSongAttributes {
            artist_name: artist.to_string(),
            name: title.to_string(),
        },
    }
}

pub fn engine(catalog: Arc<FakeCatalog>) -> MatchEngine {
    let tokens = TokenProvider::new(
        Arc::new(CountingTokenSource::default()),
        "https://music.example/kr/search",
    );
    MatchEngine::new(tokens, catalog)
}

pub fn credentials() -> SpotifyCredentials {
    SpotifyCredentials {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        refresh_token: "refresh-1".to_string(),
    }
}

pub fn spotify_client(server_uri: &str) -> SpotifyClient {
    SpotifyClient::new(
        credentials(),
        format!("{}/v1", server_uri),
        format!("{}/api/token", server_uri),
    )
}
