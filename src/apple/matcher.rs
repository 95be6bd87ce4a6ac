use std::sync::Arc;

use tracing::debug;

use super::{
    catalog::{AppleMusicClient, CatalogSearch},
    normalize,
    token::TokenProvider,
};
use crate::{
    Res,
    types::{APPLE, CatalogSong, MatchQuery, Song},
};

/// Upper bound on catalog searches per song: the original query plus one
/// normalized retry. Normalization is idempotent, so a third attempt would
/// only repeat the second.
pub const MAX_ATTEMPTS: usize = 2;

/// Finds the Apple Music catalog entry for a song.
pub struct MatchEngine {
    tokens: TokenProvider,
    catalog: Arc<dyn CatalogSearch>,
}

impl MatchEngine {
    pub fn new(tokens: TokenProvider, catalog: Arc<dyn CatalogSearch>) -> Self {
        Self { tokens, catalog }
    }

    /// Engine that scrapes the web player for tokens and searches the live
    /// catalog.
    pub fn from_env() -> Self {
        Self::new(TokenProvider::from_env(), Arc::new(AppleMusicClient::new()))
    }

    /// Searches for `song`, retrying once with a normalized query when the
    /// first search is empty and the artist carries non-literal characters.
    ///
    /// A match replaces artist and title with the catalog's spelling and adds
    /// the catalog id to the song's existing external ids. `Ok(None)` means
    /// the catalog has no match; transport and scraping failures are errors.
    pub async fn find_match(&self, song: &Song) -> Res<Option<Song>> {
        let mut query = MatchQuery::from(song);

        for attempt in 1..=MAX_ATTEMPTS {
            let token = self.tokens.get_token().await?;
            let term = query.term();

            if let Some(hit) = self.catalog.search_song(&token, &term).await? {
                debug!(attempt, %term, id = %hit.id, "catalog match");
                return Ok(Some(merge_match(song, hit)));
            }

            if !normalize::contains_non_literal(&query.artist) {
                debug!(attempt, %term, "no catalog match");
                return Ok(None);
            }

            let retry = normalize::normalize(&query);
            debug!(attempt, %term, retry = %retry.term(), "no catalog match, normalizing");
            query = retry;
        }

        Ok(None)
    }
}

fn merge_match(original: &Song, hit: CatalogSong) -> Song {
    let mut external_ids = original.external_ids.clone();
    external_ids.insert(APPLE.to_string(), hit.id);

    Song {
        artist: hit.attributes.artist_name,
        title: hit.attributes.name,
        external_ids,
    }
}
