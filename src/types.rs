use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Key of the Spotify track URI in [`Song::external_ids`].
pub const SPOTIFY: &str = "spotify";
/// Key of the Apple Music catalog id in [`Song::external_ids`].
pub const APPLE: &str = "apple";

#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// A track as seen by one or more streaming services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub artist: String,
    pub title: String,
    /// Service name to the track's id on that service.
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
}

impl Song {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Song {
            artist: artist.into(),
            title: title.into(),
            external_ids: HashMap::new(),
        }
    }

    pub fn with_id(mut self, service: &str, id: impl Into<String>) -> Self {
        self.external_ids.insert(service.to_string(), id.into());
        self
    }

    pub fn id(&self, service: &str) -> Option<&str> {
        self.external_ids.get(service).map(String::as_str)
    }
}

/// The artist/title pair sent to the catalog search. It is rewritten between
/// fallback attempts while the originating [`Song`] stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub artist: String,
    pub title: String,
}

impl MatchQuery {
    pub fn term(&self) -> String {
        format!("{} {}", self.artist, self.title)
    }
}

impl From<&Song> for MatchQuery {
    fn from(song: &Song) -> Self {
        MatchQuery {
            artist: song.artist.clone(),
            title: song.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub title: String,
    pub description: String,
    pub tracks: Vec<Song>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub artist: String,
    pub title: String,
    pub spotify: String,
    pub apple: String,
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        SongTableRow {
            artist: song.artist.clone(),
            title: song.title.clone(),
            spotify: song.id(SPOTIFY).unwrap_or("-").to_string(),
            apple: song.id(APPLE).unwrap_or("-").to_string(),
        }
    }
}

// Spotify Web API

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: Paging<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

impl Track {
    /// All artist names joined by a space, the way catalog queries expect them.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tracks: Paging<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

// Apple Music catalog API

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSearchResponse {
    #[serde(default)]
    pub results: CatalogResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResults {
    pub songs: Option<CatalogPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub data: Vec<CatalogSong>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogSong {
    pub id: String,
    pub attributes: CatalogSongAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSongAttributes {
    pub artist_name: String,
    pub name: String,
}

/// The slice of the web player's environment document that carries the token.
#[derive(Debug, Clone, Deserialize)]
pub struct WebPlayerEnvironment {
    #[serde(rename = "MEDIA_API")]
    pub media_api: MediaApi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaApi {
    pub token: String,
}
