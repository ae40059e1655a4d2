use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A followed artist. Identity is the Spotify-assigned id; the name is
/// display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// One release as cached per artist, before any filtering. The first entry
/// of `artist_names` is the primary artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelease {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub uri: String,
    pub release_type: String,
    #[serde(default)]
    pub available_markets: Vec<String>,
    pub artist_names: Vec<String>,
}

/// The final, display-ready record produced by a sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub release_date: String,
    pub url: String,
    pub artist: String,
    pub release_type: String,
}

/// Per-day album cache: artist id mapped to that artist's complete release
/// list. An entry is only present once all pages for the artist have been
/// fetched. BTreeMap keeps serialization order deterministic.
pub type AlbumCacheMap = BTreeMap<String, Vec<RawRelease>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumsResponse {
    pub items: Vec<AlbumItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumItem {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub uri: String,
    pub album_type: String,
    #[serde(default)]
    pub available_markets: Vec<String>,
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

impl From<AlbumItem> for RawRelease {
    fn from(item: AlbumItem) -> Self {
        RawRelease {
            id: item.id,
            name: item.name,
            release_date: item.release_date,
            uri: item.uri,
            release_type: item.album_type,
            available_markets: item.available_markets,
            artist_names: item.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

#[derive(Tabled)]
pub struct ReleaseTableRow {
    pub release_type: String,
    pub date: String,
    pub url: String,
    pub artist: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub id: String,
}
