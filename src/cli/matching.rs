use tabled::Table;

use super::spinner;
use crate::{
    adaptor::SpotifyAdaptor,
    apple::MatchEngine,
    error, success,
    types::{Song, SongTableRow},
    warning,
};

pub async fn match_song(artist: String, title: String) {
    let engine = MatchEngine::from_env();
    let song = Song::new(artist, title);

    let pb = spinner(format!("Searching Apple Music for {} - {}", song.artist, song.title));
    let result = engine.find_match(&song).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(matched)) => {
            success!("Found {} - {}", matched.artist, matched.title);
            println!("{}", Table::new([SongTableRow::from(&matched)]));
        }
        Ok(None) => warning!("No Apple Music match for {} - {}", song.artist, song.title),
        Err(e) => error!("Apple Music lookup failed. Err: {}", e),
    }
}

pub async fn find_song(artist: String, title: String) {
    let adaptor = match SpotifyAdaptor::from_env() {
        Ok(adaptor) => adaptor,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    };
    let song = Song::new(artist, title);

    let pb = spinner(format!("Searching Spotify for {} - {}", song.artist, song.title));
    let result = adaptor.find_song_id(&song).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(uri)) => success!("{}", uri),
        Ok(None) => warning!("No Spotify track for {} - {}", song.artist, song.title),
        Err(e) => error!("Spotify search failed. Err: {}", e),
    }
}
