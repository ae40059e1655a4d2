//! # CLI Module
//!
//! The user-facing command layer. Each command resolves configuration and
//! cache/session handles, delegates to the sync engine or the Spotify
//! client, and renders results as colored tables.
//!
//! ## Commands
//!
//! - [`auth`] - Interactive Spotify OAuth 2.0 PKCE authorization
//! - [`releases`] - Run a catalog sync and print the filtered release table
//! - [`artists`] - List today's cached followed artists, fetching on miss
//!
//! ## Error Handling Philosophy
//!
//! Per-artist failures degrade gracefully inside the sync engine; the CLI
//! layer only terminates on conditions that make the whole run meaningless
//! (no stored token, unrecoverable credential refresh, no artist list).

mod artists;
mod auth;
mod releases;

pub use artists::artists;
pub use auth::auth;
pub use releases::releases;
