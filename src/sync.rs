//! The catalog-sync orchestrator.
//!
//! One run: evict stale cache files, resolve the followed-artist list
//! (snapshot or remote), walk every artist sequentially reusing complete
//! album-cache entries and fetching the rest, filter each release, and
//! return the survivors sorted by release date descending. Per-artist fetch
//! failures are logged and skipped; only an unrecoverable credential
//! failure aborts the run.

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::SyncConfig,
    filters, info,
    management::CacheManager,
    spotify::{self, ApiError, Session},
    types::{AlbumCacheMap, Artist, RawRelease, Release},
    utils, warning,
};

const SPOTIFY_ALBUM_URL_BASE: &str = "https://open.spotify.com/album/";

/// Runs a full sync and returns the filtered, date-sorted release list.
pub async fn run(
    session: &mut Session,
    cache: &CacheManager,
    cfg: &SyncConfig,
) -> Result<Vec<Release>, ApiError> {
    if let Err(e) = cache.ensure_dir().await {
        warning!("Cannot create cache directory: {:?}", e);
    }
    cache.evict_stale(cfg.cache_retention_days);

    let artists = resolve_artists(session, cache, cfg).await?;
    let mut album_cache: AlbumCacheMap = cache.load_album_cache().await.unwrap_or_default();

    let pb = ProgressBar::new(artists.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let today = cache.today();
    let mut releases: Vec<Release> = Vec::new();
    let mut filtered_log: Vec<String> = Vec::new();
    let mut skipped_log: Vec<String> = Vec::new();

    for artist in &artists {
        pb.set_message(artist.name.clone());

        let artist_releases: Vec<RawRelease> = if let Some(cached) = album_cache.get(&artist.id) {
            cached.clone()
        } else {
            match spotify::releases::get_artist_releases(session, &artist.id, cfg).await {
                Ok(fetched) => {
                    album_cache.insert(artist.id.clone(), fetched.clone());
                    // write-through after every artist: a crash loses at
                    // most the in-flight fetch, not prior progress
                    if let Err(e) = cache.save_album_cache(&album_cache).await {
                        warning!("Cannot persist album cache: {:?}", e);
                    }
                    fetched
                }
                Err(err @ ApiError::AuthUnrecoverable(_)) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
                Err(err) => {
                    skipped_log.push(format!("Skipping artist {}: {}", artist.name, err));
                    pb.inc(1);
                    continue;
                }
            }
        };

        for raw in &artist_releases {
            match filter_release(raw, today, cfg) {
                Some(reason) => {
                    if cfg.log_filtered {
                        filtered_log.push(format!("Filtered out {}: {}", reason, raw.name));
                    }
                }
                None => releases.push(to_release(raw, cfg)),
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    for line in &skipped_log {
        warning!("{}", line);
    }
    for line in &filtered_log {
        info!("{}", line);
    }

    utils::sort_releases_by_date(&mut releases);
    Ok(releases)
}

/// Today's snapshot when one exists, otherwise a full remote enumeration
/// that is then persisted for the rest of the day.
async fn resolve_artists(
    session: &mut Session,
    cache: &CacheManager,
    cfg: &SyncConfig,
) -> Result<Vec<Artist>, ApiError> {
    if let Some(artists) = cache.load_artist_snapshot().await {
        info!("Loaded {} followed artists from cache", artists.len());
        return Ok(artists);
    }

    let artists = spotify::artists::get_followed_artists(session, cfg).await?;
    if let Err(e) = cache.save_artist_snapshot(&artists).await {
        warning!("Cannot persist artist snapshot: {:?}", e);
    }
    info!("Fetched and cached {} followed artists", artists.len());
    Ok(artists)
}

/// Applies the filter chain to one release. Returns the rejection reason,
/// or None when the release passes every gate.
///
/// Order is fixed and short-circuits: age, region, type, then the four
/// independent opt-in category exclusions over the normalized title.
fn filter_release(raw: &RawRelease, today: NaiveDate, cfg: &SyncConfig) -> Option<&'static str> {
    let Some(release_date) = utils::parse_release_date(&raw.release_date) else {
        return Some("undated release");
    };
    if utils::days_between(today, release_date) > cfg.max_age_days {
        return Some("release outside age window");
    }

    if let Some(region) = &cfg.region {
        if !raw.available_markets.iter().any(|m| m == region) {
            return Some("release unavailable in region");
        }
    }

    if cfg.albums_only && raw.release_type != "album" {
        return Some("non-album release");
    }

    let normalized = filters::normalize_title(&raw.name);
    if cfg.exclude_live && filters::is_live_recording(&normalized) {
        return Some("live recording");
    }
    if cfg.exclude_re_releases && filters::is_re_release(&normalized) {
        return Some("re-release");
    }
    if cfg.exclude_soundtracks && filters::is_soundtrack(&normalized) {
        return Some("soundtrack");
    }
    if cfg.exclude_remixes && filters::is_remix(&normalized) {
        return Some("remix");
    }

    None
}

fn to_release(raw: &RawRelease, cfg: &SyncConfig) -> Release {
    Release {
        name: raw.name.clone(),
        release_date: raw.release_date.clone(),
        url: if cfg.show_urls {
            format!("{}{}", SPOTIFY_ALBUM_URL_BASE, raw.id)
        } else {
            raw.uri.clone()
        },
        artist: raw.artist_names.first().cloned().unwrap_or_default(),
        release_type: raw.release_type.clone(),
    }
}
