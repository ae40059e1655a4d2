mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::{get, post}};
use chrono::{Duration as ChronoDuration, Utc};
use radarcli::{
    config::SyncConfig,
    spotify::ApiError,
    sync,
    types::{AlbumCacheMap, Artist, RawRelease},
};
use serde_json::json;

use common::*;

fn days_ago(n: i64) -> String {
    (Utc::now().date_naive() - ChronoDuration::days(n))
        .format("%Y-%m-%d")
        .to_string()
}

fn cached_release(id: &str, name: &str, date: &str, markets: Vec<&str>) -> RawRelease {
    RawRelease {
        id: id.to_string(),
        name: name.to_string(),
        release_date: date.to_string(),
        uri: format!("spotify:album:{id}"),
        release_type: "album".to_string(),
        available_markets: markets.into_iter().map(str::to_string).collect(),
        artist_names: vec!["Artist 1".to_string()],
    }
}

#[tokio::test]
async fn test_sync_filters_by_age_and_region() {
    let albums = json!({
        "items": [
            album_json("album-new", "Fresh Album", &days_ago(40), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-old", "Old Album", &days_ago(400), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-elsewhere", "Elsewhere Album", &days_ago(10), "album", vec!["JP"], ("artist-1", "Artist 1")),
            album_json("album-ep", "Fresh EP", &days_ago(8), "single", vec!["CA"], ("artist-1", "Artist 1")),
        ]
    });

    let app = Router::new()
        .route(
            "/v1/me/following",
            get(|| async { Json(artists_page(vec![artist_json(1)], None)) }),
        )
        .route(
            "/v1/artists/{id}/albums",
            get(move || {
                let albums = albums.clone();
                async move { Json(albums) }
            }),
        );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();
    let mut session = mock_session(addr, cache.clone());

    let cfg = SyncConfig {
        max_age_days: 60,
        region: Some("CA".to_string()),
        albums_only: true,
        ..quick_config()
    };

    let result = sync::run(&mut session, &cache, &cfg)
        .await
        .expect("sync succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Fresh Album");
    assert_eq!(result[0].artist, "Artist 1");
    assert_eq!(result[0].url, "spotify:album:album-new");

    // snapshot persisted for the rest of the day
    let snapshot = cache.load_artist_snapshot().await.expect("snapshot saved");
    assert_eq!(snapshot.len(), 1);

    // the album cache entry is complete and unfiltered
    let album_cache = cache.load_album_cache().await.expect("album cache saved");
    assert_eq!(album_cache.get("artist-1").map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_sync_reuses_cached_entries_without_refetching() {
    let artist_calls = Arc::new(AtomicUsize::new(0));
    let album_calls = Arc::new(AtomicUsize::new(0));
    let artist_handler = Arc::clone(&artist_calls);
    let album_handler = Arc::clone(&album_calls);

    let app = Router::new()
        .route(
            "/v1/me/following",
            get(move || {
                let calls = Arc::clone(&artist_handler);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(artists_page(vec![], None))
                }
            }),
        )
        .route(
            "/v1/artists/{id}/albums",
            get(move || {
                let calls = Arc::clone(&album_handler);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "items": [] }))
                }
            }),
        );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();

    // seed today's snapshot and a complete album entry
    cache
        .save_artist_snapshot(&[Artist {
            id: "artist-1".to_string(),
            name: "Artist 1".to_string(),
        }])
        .await
        .expect("seed snapshot");
    let mut map = AlbumCacheMap::new();
    map.insert(
        "artist-1".to_string(),
        vec![cached_release("album-1", "Cached Album", &days_ago(5), vec!["CA"])],
    );
    cache.save_album_cache(&map).await.expect("seed album cache");

    let mut session = mock_session(addr, cache.clone());
    let result = sync::run(&mut session, &cache, &quick_config())
        .await
        .expect("sync succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Cached Album");
    assert_eq!(artist_calls.load(Ordering::SeqCst), 0);
    assert_eq!(album_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_artist_is_skipped_and_run_continues() {
    let ok_albums = json!({
        "items": [
            album_json("album-2", "Second Artist Album", &days_ago(3), "album", vec!["CA"], ("artist-2", "Artist 2")),
        ]
    });

    let app = Router::new().route(
        "/v1/artists/{id}/albums",
        get(move |Path(id): Path<String>| {
            let ok_albums = ok_albums.clone();
            async move {
                if id == "artist-1" {
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
                } else {
                    Json(ok_albums).into_response()
                }
            }
        }),
    );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();

    cache
        .save_artist_snapshot(&[
            Artist {
                id: "artist-1".to_string(),
                name: "Artist 1".to_string(),
            },
            Artist {
                id: "artist-2".to_string(),
                name: "Artist 2".to_string(),
            },
        ])
        .await
        .expect("seed snapshot");

    let mut session = mock_session(addr, cache.clone());
    let result = sync::run(&mut session, &cache, &quick_config())
        .await
        .expect("run survives a failing artist");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].artist, "Artist 2");

    // the failing artist has no cache entry; the good one is complete
    let album_cache = cache.load_album_cache().await.expect("album cache saved");
    assert!(album_cache.get("artist-1").is_none());
    assert_eq!(album_cache.get("artist-2").map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_unrecoverable_auth_aborts_the_run() {
    let app = Router::new()
        .route(
            "/v1/artists/{id}/albums",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "status": 401, "message": "The access token expired" } })),
                )
            }),
        )
        .route(
            "/api/token",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" }))) }),
        );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();

    cache
        .save_artist_snapshot(&[Artist {
            id: "artist-1".to_string(),
            name: "Artist 1".to_string(),
        }])
        .await
        .expect("seed snapshot");

    let mut session = mock_session(addr, cache.clone());
    let err = sync::run(&mut session, &cache, &quick_config())
        .await
        .expect_err("run aborts");

    assert!(matches!(err, ApiError::AuthUnrecoverable(_)));
}

#[tokio::test]
async fn test_results_sort_descending_with_stable_ties() {
    let albums = json!({
        "items": [
            album_json("album-b", "Album B", &days_ago(10), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-a", "Album A", &days_ago(5), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-c", "Album C", &days_ago(10), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-d", "Album D", &days_ago(20), "album", vec!["CA"], ("artist-1", "Artist 1")),
        ]
    });

    let app = Router::new().route(
        "/v1/artists/{id}/albums",
        get(move || {
            let albums = albums.clone();
            async move { Json(albums) }
        }),
    );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();

    cache
        .save_artist_snapshot(&[Artist {
            id: "artist-1".to_string(),
            name: "Artist 1".to_string(),
        }])
        .await
        .expect("seed snapshot");

    let mut session = mock_session(addr, cache.clone());
    let result = sync::run(&mut session, &cache, &quick_config())
        .await
        .expect("sync succeeds");

    let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
    // newest first; the two same-day releases keep their encounter order
    assert_eq!(names, vec!["Album A", "Album B", "Album C", "Album D"]);
}

#[tokio::test]
async fn test_category_exclusions_are_individually_toggleable() {
    let albums = json!({
        "items": [
            album_json("album-1", "Studio Album", &days_ago(5), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-2", "Live at the Forum", &days_ago(4), "album", vec!["CA"], ("artist-1", "Artist 1")),
            album_json("album-3", "Studio Album (Deluxe Edition)", &days_ago(3), "album", vec!["CA"], ("artist-1", "Artist 1")),
        ]
    });

    let app = Router::new().route(
        "/v1/artists/{id}/albums",
        get(move || {
            let albums = albums.clone();
            async move { Json(albums) }
        }),
    );

    let addr = serve(app).await;
    let (_dir, cache) = temp_cache();

    cache
        .save_artist_snapshot(&[Artist {
            id: "artist-1".to_string(),
            name: "Artist 1".to_string(),
        }])
        .await
        .expect("seed snapshot");

    // live recordings allowed, re-releases still excluded
    let cfg = SyncConfig {
        exclude_live: false,
        ..quick_config()
    };

    let mut session = mock_session(addr, cache.clone());
    let result = sync::run(&mut session, &cache, &cfg)
        .await
        .expect("sync succeeds");

    let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Studio Album"));
    assert!(names.contains(&"Live at the Forum"));
    assert!(!names.contains(&"Studio Album (Deluxe Edition)"));
}
