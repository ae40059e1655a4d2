#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use chrono::Utc;
use radarcli::{
    config::SyncConfig,
    management::{CacheManager, TokenManager},
    spotify::Session,
    types::Token,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Binds a mock Spotify service on an ephemeral port and serves it for the
/// remainder of the test.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock server");
    });
    addr
}

/// A cache manager rooted in a fresh temp directory, keyed to today.
pub fn temp_cache() -> (TempDir, CacheManager) {
    let dir = tempfile::tempdir().expect("create temp cache dir");
    let cache = CacheManager::new(dir.path().to_path_buf(), Utc::now().date_naive());
    (dir, cache)
}

/// A token that is nowhere near expiry, so no proactive refresh kicks in.
pub fn stored_token() -> Token {
    Token {
        access_token: "token-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        scope: "user-follow-read".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// A session pointed at the mock service, with the token endpoint routed to
/// `/api/token` on the same server.
pub fn mock_session(addr: SocketAddr, cache: CacheManager) -> Session {
    let tokens = TokenManager::new(
        stored_token(),
        cache,
        format!("http://{addr}/api/token"),
        "client-id".to_string(),
    );
    Session::new(format!("http://{addr}/v1"), tokens)
}

/// Default config with a backoff short enough for tests that exhaust the
/// retry budget.
pub fn quick_config() -> SyncConfig {
    SyncConfig {
        initial_backoff_ms: 5,
        ..SyncConfig::default()
    }
}

pub fn artist_json(i: usize) -> Value {
    json!({ "id": format!("artist-{i}"), "name": format!("Artist {i}") })
}

pub fn artists_page(items: Vec<Value>, after: Option<&str>) -> Value {
    json!({
        "artists": {
            "items": items,
            "next": after,
            "cursors": { "after": after },
            "total": Value::Null,
        }
    })
}

pub fn album_json(
    id: &str,
    name: &str,
    date: &str,
    album_type: &str,
    markets: Vec<&str>,
    primary: (&str, &str),
) -> Value {
    json!({
        "id": id,
        "name": name,
        "release_date": date,
        "uri": format!("spotify:album:{id}"),
        "album_type": album_type,
        "available_markets": markets,
        "artists": [ { "id": primary.0, "name": primary.1 } ],
    })
}
