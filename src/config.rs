//! Configuration management for the release radar CLI.
//!
//! Two layers live here: environment-backed settings (Spotify endpoints and
//! OAuth parameters, loaded from a `.env` file in the local data directory
//! or from the process environment), and [`SyncConfig`], the plain value
//! struct consumed by the catalog-sync engine. The engine never reads flags
//! or environment variables itself; the CLI layer resolves both into a
//! `SyncConfig` and threads it through every call.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for the file under the platform-specific local data directory
/// (`radarcli/.env`), creating the directory if needed. A missing file is
/// not an error; variables may also be provided by the environment directly.
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radarcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID used during authorization.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the OAuth scope requested during authorization.
///
/// Reading followed artists requires the `user-follow-read` scope.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Values consumed by the catalog-sync engine.
///
/// The four `exclude_*` toggles are independent opt-in exclusions; the CLI
/// exposes them inverted as `--show-*` flags, so by default live recordings,
/// re-releases, soundtracks, and remixes are filtered out.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Releases older than this many days are dropped.
    pub max_age_days: i64,
    /// ISO 3166-1 alpha-2 region a release must be available in, if set.
    pub region: Option<String>,
    /// Keep full-length albums only.
    pub albums_only: bool,
    /// Emit open.spotify.com URLs instead of spotify: URIs.
    pub show_urls: bool,
    pub exclude_live: bool,
    pub exclude_re_releases: bool,
    pub exclude_soundtracks: bool,
    pub exclude_remixes: bool,
    /// Log each filtered-out release after the run.
    pub log_filtered: bool,
    /// Cache files older than this many days are evicted at sync start.
    pub cache_retention_days: u32,
    /// Page size for both pagination schemes (Spotify caps this at 50).
    pub page_size: u32,
    /// Delayed retries granted to a catalog call after its first failure.
    pub retry_budget: u32,
    /// First backoff delay; doubles on every further retry.
    pub initial_backoff_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_age_days: 60,
            region: None,
            albums_only: false,
            show_urls: false,
            exclude_live: true,
            exclude_re_releases: true,
            exclude_soundtracks: true,
            exclude_remixes: true,
            log_filtered: false,
            cache_retention_days: 60,
            page_size: 50,
            retry_budget: 3,
            initial_backoff_ms: 500,
        }
    }
}
