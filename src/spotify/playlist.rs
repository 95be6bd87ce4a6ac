use tracing::debug;

use super::SpotifyClient;
use crate::{
    Error, Res,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetPlaylistResponse, Paging, PlaylistTrackItem,
    },
};

/// Spotify accepts at most this many URIs per add-tracks request.
pub const ADD_TRACKS_CHUNK: usize = 100;

impl SpotifyClient {
    /// Fetches a playlist with every page of its tracks.
    ///
    /// The returned `tracks.items` holds all items in playlist order and
    /// `tracks.next` is always `None`.
    pub async fn get_playlist(&self, playlist_id: &str) -> Res<GetPlaylistResponse> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(self.endpoint(&format!("playlists/{}", playlist_id)))
            .bearer_auth(&token)
            .send()
            .await?;

        let response = Error::check_response("Spotify", response).await?;
        let mut playlist = response.json::<GetPlaylistResponse>().await?;

        let mut next = playlist.tracks.next.take();
        while let Some(url) = next {
            debug!(%url, "fetching next playlist page");
            let token = self.access_token().await?;
            let response = self.http_client.get(&url).bearer_auth(&token).send().await?;
            let response = Error::check_response("Spotify", response).await?;
            let page = response.json::<Paging<PlaylistTrackItem>>().await?;

            playlist.tracks.items.extend(page.items);
            next = page.next;
        }

        Ok(playlist)
    }

    pub async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .post(self.endpoint(&format!("users/{}/playlists", user_id)))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let response = Error::check_response("Spotify", response).await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    /// Appends `uris` to the playlist in chunks of [`ADD_TRACKS_CHUNK`].
    /// Returns the snapshot id of the last write.
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<Option<String>> {
        let mut snapshot_id = None;

        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let token = self.access_token().await?;
            let request = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };

            let response = self
                .http_client
                .post(self.endpoint(&format!("playlists/{}/tracks", playlist_id)))
                .bearer_auth(token)
                .json(&request)
                .send()
                .await?;

            let response = Error::check_response("Spotify", response).await?;
            let json = response.json::<AddTrackToPlaylistResponse>().await?;
            snapshot_id = Some(json.snapshot_id);
        }

        Ok(snapshot_id)
    }
}
