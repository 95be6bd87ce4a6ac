//! The three operations other services call: look a song up on Spotify,
//! publish a playlist to Spotify, and read a Spotify playlist translated to
//! Apple Music catalog entries.

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, warn};

use crate::{
    Error, Res,
    apple::MatchEngine,
    config,
    spotify::SpotifyClient,
    types::{CreatePlaylistRequest, MatchQuery, Playlist, SPOTIFY, Song},
};

/// URL fragments that mark a playlist as one this adaptor reads.
pub const DETERMINATOR: &[&str] = &["spotify"];

/// Whether `url` belongs to a service this adaptor handles.
pub fn handles(url: &str) -> bool {
    DETERMINATOR.iter().any(|marker| url.contains(marker))
}

/// What to do when the catalog lookup of a single track fails while a whole
/// playlist is translated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failed lookup fails the whole translation.
    #[default]
    Abort,
    /// A failed lookup is logged and the track keeps its Spotify data.
    Isolate,
}

pub struct SpotifyAdaptor {
    spotify: SpotifyClient,
    matcher: MatchEngine,
    user_id: Option<String>,
    concurrency: usize,
    failure_policy: FailurePolicy,
}

impl SpotifyAdaptor {
    pub fn new(spotify: SpotifyClient, matcher: MatchEngine) -> Self {
        Self {
            spotify,
            matcher,
            user_id: None,
            concurrency: config::DEFAULT_MATCH_CONCURRENCY,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Adaptor wired to the live services. `SPOTIFY_USER_ID` is optional here
    /// and only needed by [`SpotifyAdaptor::generate_url`].
    pub fn from_env() -> Res<Self> {
        let adaptor = Self::new(SpotifyClient::from_env()?, MatchEngine::from_env())
            .concurrency(config::match_concurrency()?);

        Ok(match config::spotify_user() {
            Ok(user_id) => adaptor.user_id(user_id),
            Err(_) => adaptor,
        })
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Maximum number of catalog lookups in flight. Zero is treated as one.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Spotify track URI of the first search hit for the song's artist and
    /// title.
    pub async fn find_song_id(&self, song: &Song) -> Res<Option<String>> {
        let query = MatchQuery::from(song).term();
        self.spotify.search_track_uri(&query).await
    }

    /// Creates a public playlist on the master account and fills it with the
    /// songs that carry a Spotify id. Returns the playlist's URL.
    ///
    /// Creation and insertion are separate requests: if insertion fails the
    /// empty playlist stays behind.
    pub async fn generate_url(&self, playlist: &Playlist) -> Res<String> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or_else(|| Error::Config("SPOTIFY_USER_ID must be set".to_string()))?;

        let request = CreatePlaylistRequest {
            name: playlist.title.clone(),
            description: playlist.description.clone(),
            public: true,
            collaborative: false,
        };
        let created = self.spotify.create_playlist(user_id, &request).await?;

        let uris: Vec<String> = playlist
            .tracks
            .iter()
            .filter_map(|song| song.id(SPOTIFY).map(str::to_string))
            .collect();

        let skipped = playlist.tracks.len() - uris.len();
        if skipped > 0 {
            warn!(skipped, "songs without a Spotify id were not added");
        }

        if !uris.is_empty() {
            self.spotify.add_tracks(&created.id, &uris).await?;
        }

        Ok(created.external_urls.spotify.unwrap_or(created.href))
    }

    /// Reads a Spotify playlist and matches every track against the Apple
    /// Music catalog.
    ///
    /// Every track is kept. Matched tracks take the catalog's artist and title
    /// and gain an `apple` id, unmatched ones keep their Spotify data. All of
    /// them carry their Spotify URI under `spotify`.
    pub async fn get_playlist_content(&self, playlist_url: &str) -> Res<Playlist> {
        let playlist_id = parse_playlist_id(playlist_url)?;
        let remote = self.spotify.get_playlist(&playlist_id).await?;

        let songs: Vec<Song> = remote
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| !track.name.is_empty())
            .map(|track| Song::new(track.artist_names(), track.name).with_id(SPOTIFY, track.uri))
            .collect();

        debug!(%playlist_id, tracks = songs.len(), "translating playlist");

        Ok(Playlist {
            title: remote.name,
            description: remote.description.unwrap_or_default(),
            tracks: self.translate(songs).await?,
        })
    }

    /// Matches `songs` with at most `concurrency` lookups in flight, keeping
    /// their order.
    pub async fn translate(&self, songs: Vec<Song>) -> Res<Vec<Song>> {
        stream::iter(songs)
            .map(|song| self.resolve(song))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn resolve(&self, song: Song) -> Res<Song> {
        match self.matcher.find_match(&song).await {
            Ok(Some(matched)) => Ok(matched),
            Ok(None) => Ok(song),
            Err(e) if self.failure_policy == FailurePolicy::Isolate => {
                warn!(artist = %song.artist, title = %song.title, error = %e, "catalog lookup failed");
                Ok(song)
            }
            Err(e) => Err(e),
        }
    }
}

/// Extracts the playlist id from a URL like
/// `https://open.spotify.com/playlist/<id>?si=...`: the text after the first
/// `/playlist/`, cut at the next `/` or `?`.
pub fn parse_playlist_id(playlist_url: &str) -> Res<String> {
    let (_, rest) = playlist_url
        .split_once("/playlist/")
        .ok_or_else(|| Error::InvalidPlaylistUrl(playlist_url.to_string()))?;

    let id = rest
        .split(['/', '?'])
        .next()
        .unwrap_or_default();

    if id.is_empty() {
        return Err(Error::InvalidPlaylistUrl(playlist_url.to_string()));
    }

    Ok(id.to_string())
}
