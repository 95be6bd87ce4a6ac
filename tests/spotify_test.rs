mod common;

use base64::{Engine, engine::general_purpose::STANDARD};
use common::spotify_client;
use myplycli::{Error, types::CreatePlaylistRequest};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    let basic = format!("Basic {}", STANDARD.encode("client-id:client-secret"));

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", basic.as_str()))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "playlist-modify-public"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn track_json(id: &str, name: &str, artists: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_search_track_uri_reuses_access_token() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "IU 밤편지"))
        .and(query_param("type", "track"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "items": [track_json("3P3UA61WRQqwCXaoFOTENd", "밤편지", &["IU"])],
                "next": null
            }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());

    let first = client.search_track_uri("IU 밤편지").await.unwrap();
    let second = client.search_track_uri("IU 밤편지").await.unwrap();

    assert_eq!(first.as_deref(), Some("spotify:track:3P3UA61WRQqwCXaoFOTENd"));
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_access_token_close_to_expiry_is_refreshed() {
    let mock_server = MockServer::start().await;

    // 200 s of lifetime is already inside the refresh margin
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short-lived",
            "expires_in": 200
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("authorization", "Bearer short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [], "next": null }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());

    assert_eq!(client.search_track_uri("IU 밤편지").await.unwrap(), None);
    assert_eq!(client.search_track_uri("IU 밤편지").await.unwrap(), None);
}

#[tokio::test]
async fn test_search_track_uri_without_results() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [], "next": null }
        })))
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    assert_eq!(client.search_track_uri("nothing here").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_playlist_follows_pagination() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc123",
            "name": "K-Indie",
            "description": "Late night",
            "tracks": {
                "items": [
                    { "track": track_json("t1", "밤편지", &["IU"]) },
                    { "track": track_json("t2", "봄이 좋냐??", &["10CM"]) }
                ],
                "next": format!("{}/v1/playlists/abc123/tracks?offset=2&limit=2", mock_server.uri())
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/abc123/tracks"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "track": track_json("t3", "Hype Boy", &["NewJeans"]) },
                { "track": null }
            ],
            "next": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    let playlist = client.get_playlist("abc123").await.unwrap();

    assert_eq!(playlist.name, "K-Indie");
    assert_eq!(playlist.tracks.items.len(), 4);
    assert!(playlist.tracks.next.is_none());
    assert_eq!(
        playlist.tracks.items[2].track.as_ref().map(|t| t.name.as_str()),
        Some("Hype Boy")
    );
    assert!(playlist.tracks.items[3].track.is_none());
}

#[tokio::test]
async fn test_get_playlist_not_found() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "Resource not found" }
        })))
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    let result = client.get_playlist("missing").await;

    match result {
        Err(Error::Api { status, body, .. }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body.contains("Resource not found"));
        }
        other => panic!("expected an API error, got {:?}", other.map(|p| p.id)),
    }
}

#[tokio::test]
async fn test_token_endpoint_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    let result = client.search_track_uri("IU 밤편지").await;

    assert!(matches!(
        result,
        Err(Error::Api { status: StatusCode::BAD_REQUEST, .. })
    ));
}

#[tokio::test]
async fn test_create_playlist() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/v1/users/master/playlists"))
        .and(body_json(json!({
            "name": "Copied",
            "description": "from Spotify",
            "public": true,
            "collaborative": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new1",
            "href": "https://api.spotify.com/v1/playlists/new1",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/new1" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    let request = CreatePlaylistRequest {
        name: "Copied".to_string(),
        description: "from Spotify".to_string(),
        public: true,
        collaborative: false,
    };

    let created = client.create_playlist("master", &request).await.unwrap();

    assert_eq!(created.id, "new1");
    assert_eq!(
        created.external_urls.spotify.as_deref(),
        Some("https://open.spotify.com/playlist/new1")
    );
}

#[tokio::test]
async fn test_add_tracks_is_chunked() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server, 1).await;

    let uris: Vec<String> = (0..150).map(|i| format!("spotify:track:{}", i)).collect();

    Mock::given(method("POST"))
        .and(path("/v1/playlists/new1/tracks"))
        .and(body_json(json!({ "uris": uris[..100] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap-1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/playlists/new1/tracks"))
        .and(body_json(json!({ "uris": uris[100..] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap-2" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = spotify_client(&mock_server.uri());
    let snapshot = client.add_tracks("new1", &uris).await.unwrap();

    assert_eq!(snapshot.as_deref(), Some("snap-2"));
}
