use chrono::Utc;
use tabled::Table;

use crate::{
    config::{self, SyncConfig},
    error,
    management::{CacheManager, TokenManager},
    spotify::{ApiError, Session},
    success, sync,
    types::ReleaseTableRow,
};

pub async fn releases(cfg: SyncConfig) {
    let cache = CacheManager::new(CacheManager::default_dir(), Utc::now().date_naive());

    let tokens = match TokenManager::load(
        cache.clone(),
        config::spotify_apitoken_url(),
        config::spotify_client_id(),
    )
    .await
    {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run radarcli auth\n Error: {}",
                e
            );
        }
    };

    let mut session = Session::new(config::spotify_apiurl(), tokens);

    let releases = match sync::run(&mut session, &cache, &cfg).await {
        Ok(releases) => releases,
        Err(err @ ApiError::AuthUnrecoverable(_)) => {
            error!("{}. Please run radarcli auth", err);
        }
        Err(err) => {
            error!("Sync failed: {}", err);
        }
    };

    if releases.is_empty() {
        success!("No new releases within the last {} days.", cfg.max_age_days);
        return;
    }

    let rows: Vec<ReleaseTableRow> = releases
        .into_iter()
        .map(|r| ReleaseTableRow {
            release_type: r.release_type,
            date: r.release_date,
            url: r.url,
            artist: r.artist,
            name: r.name,
        })
        .collect();

    let count = rows.len();
    let table = Table::new(rows);
    println!("{}", table);
    success!("{} new releases.", count);
}
