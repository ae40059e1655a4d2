//! # API Module
//!
//! HTTP endpoints for the local callback server used during authorization.
//!
//! - [`callback`] - Receives the OAuth redirect from Spotify and completes
//!   the PKCE code-for-token exchange
//! - [`health`] - Status endpoint returning application version
//!
//! Both handlers are plain async functions wired into an [Axum](https://docs.rs/axum)
//! router by `crate::server`. The callback shares its PKCE state with the
//! initiating auth command through an `Arc<Mutex<Option<PkceToken>>>`
//! extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
