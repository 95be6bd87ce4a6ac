use super::SpotifyClient;
use crate::{Error, Res, types::SearchTracksResponse};

impl SpotifyClient {
    /// URI of the first track Spotify returns for `query`.
    pub async fn search_track_uri(&self, query: &str) -> Res<Option<String>> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(self.endpoint("search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?;

        let response = Error::check_response("Spotify", response).await?;
        let json = response.json::<SearchTracksResponse>().await?;

        Ok(json.tracks.items.into_iter().next().map(|track| track.uri))
    }
}
