use tabled::Table;

use super::spinner;
use crate::{
    adaptor::{self, FailurePolicy, SpotifyAdaptor},
    error, info, success,
    types::{APPLE, Playlist, SongTableRow},
    warning,
};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub concurrency: Option<usize>,
    pub keep_going: bool,
}

pub async fn translate(playlist_url: String, options: TranslateOptions, json: bool) {
    let adaptor = build_adaptor(&options);
    let playlist = translate_with(&adaptor, &playlist_url, !json).await;

    if json {
        match serde_json::to_string_pretty(&playlist) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize playlist. Err: {}", e),
        }
        return;
    }

    let rows: Vec<SongTableRow> = playlist.tracks.iter().map(SongTableRow::from).collect();
    info!("{}", playlist.title);
    println!("{}", Table::new(rows));
}

pub async fn generate(
    playlist_url: String,
    options: TranslateOptions,
    name: Option<String>,
    description: Option<String>,
    open: bool,
) {
    let adaptor = build_adaptor(&options);
    let mut playlist = translate_with(&adaptor, &playlist_url, true).await;

    if let Some(name) = name {
        playlist.title = name;
    }
    if let Some(description) = description {
        playlist.description = description;
    }

    info!("Create playlist {}", playlist.title);
    let pb = spinner("Creating playlist...");
    let result = adaptor.generate_url(&playlist).await;
    pb.finish_and_clear();

    let url = match result {
        Ok(url) => url,
        Err(e) => error!("Failed to create playlist. Err: {}", e),
    };
    success!("Playlist created: {}", url);

    if open && webbrowser::open(&url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL manually.");
    }
}

fn build_adaptor(options: &TranslateOptions) -> SpotifyAdaptor {
    let mut adaptor = match SpotifyAdaptor::from_env() {
        Ok(adaptor) => adaptor,
        Err(e) => error!("Cannot set up clients. Err: {}", e),
    };

    if let Some(concurrency) = options.concurrency {
        adaptor = adaptor.concurrency(concurrency);
    }
    if options.keep_going {
        adaptor = adaptor.failure_policy(FailurePolicy::Isolate);
    }
    adaptor
}

async fn translate_with(adaptor: &SpotifyAdaptor, playlist_url: &str, report: bool) -> Playlist {
    if !adaptor::handles(playlist_url) {
        error!("Not a Spotify playlist URL: {}", playlist_url);
    }

    let pb = spinner("Fetching playlist and matching tracks...");
    let result = adaptor.get_playlist_content(playlist_url).await;
    pb.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to translate playlist. Err: {}", e),
    };

    if report {
        let matched = playlist
            .tracks
            .iter()
            .filter(|song| song.id(APPLE).is_some())
            .count();
        success!(
            "Matched {} of {} tracks on Apple Music",
            matched,
            playlist.tracks.len()
        );
    }

    playlist
}
