//! # Spotify Integration Module
//!
//! The client layer for the Spotify Web API. It owns the HTTP session, the
//! error taxonomy for catalog calls, and the retry bookkeeping shared by the
//! two paginated read operations.
//!
//! ## Structure
//!
//! - [`auth`] - OAuth 2.0 PKCE flow (browser handoff, code exchange)
//! - [`artists`] - cursor-paginated enumeration of followed artists
//! - [`releases`] - offset-paginated fetch of an artist's releases
//!
//! ## Sessions
//!
//! All catalog calls go through an explicit [`Session`] value that bundles
//! the HTTP client, the API base URL, and the token manager. There is no
//! process-wide client handle; whoever runs a sync constructs the session
//! and passes it down, which also lets tests point one at a local mock
//! server.
//!
//! ## Error handling
//!
//! [`ApiError`] distinguishes credential expiry (recovered by an immediate
//! refresh-and-retry, no backoff) from transient failures (bounded
//! exponential backoff via [`Backoff`]) and from structurally invalid
//! payloads (never retried). An unrecoverable refresh failure aborts the
//! whole run.

pub mod artists;
pub mod auth;
pub mod releases;

use std::{fmt, time::Duration};

use tokio::time::sleep;

use crate::{config::SyncConfig, management::TokenManager};

#[derive(Debug)]
pub enum ApiError {
    /// The service rejected the access token as expired.
    AuthExpired,
    /// The stored refresh credential is missing or was rejected; nothing can
    /// be fetched until the user re-authorizes.
    AuthUnrecoverable(String),
    /// Timeout, 5xx, rate limit, or any other failure worth retrying.
    Transient(String),
    /// The service returned a structurally unexpected payload.
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AuthExpired => write!(f, "access token expired"),
            ApiError::AuthUnrecoverable(msg) => write!(f, "authentication unrecoverable: {msg}"),
            ApiError::Transient(msg) => write!(f, "transient service error: {msg}"),
            ApiError::InvalidResponse(msg) => write!(f, "invalid response shape: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transient(err.to_string())
    }
}

/// Explicit session context for catalog calls: HTTP client, API base URL,
/// and the credential owned by the token manager.
pub struct Session {
    http: reqwest::Client,
    api_url: String,
    tokens: TokenManager,
}

impl Session {
    pub fn new(api_url: String, tokens: TokenManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            tokens,
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// A bearer token for the next request, refreshed proactively when the
    /// stored one is near expiry.
    pub async fn bearer(&mut self) -> Result<String, ApiError> {
        self.tokens.get_valid_token().await
    }

    /// Forces a token refresh after the service signalled expiry.
    pub async fn refresh_credentials(&mut self) -> Result<(), ApiError> {
        self.tokens.refresh().await
    }
}

/// Retry bookkeeping for one catalog operation: a budget of delayed retries
/// with a doubling backoff. Credential refreshes do not consume budget.
pub(crate) struct Backoff {
    remaining: u32,
    delay: Duration,
}

impl Backoff {
    pub(crate) fn new(cfg: &SyncConfig) -> Self {
        Self {
            remaining: cfg.retry_budget,
            delay: Duration::from_millis(cfg.initial_backoff_ms),
        }
    }

    /// Sleeps for the current delay and doubles it for next time. Returns
    /// false once the budget is exhausted, in which case the caller
    /// re-raises the original error.
    pub(crate) async fn wait(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        sleep(self.delay).await;
        self.delay *= 2;
        true
    }
}
