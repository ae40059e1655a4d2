use chrono::Utc;
use tabled::Table;

use crate::{
    config::{self, SyncConfig},
    error,
    management::{CacheManager, TokenManager},
    spotify::{self, Session},
    types::ArtistTableRow,
    warning,
};

pub async fn artists(search: Option<String>) {
    let cache = CacheManager::new(CacheManager::default_dir(), Utc::now().date_naive());

    let artists = match cache.load_artist_snapshot().await {
        Some(artists) => artists,
        None => {
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
            let cfg = SyncConfig::default();

            match spotify::artists::get_followed_artists(&mut session, &cfg).await {
                Ok(artists) => {
                    if let Err(e) = cache.save_artist_snapshot(&artists).await {
                        warning!("Cannot cache artists. Err: {:?}", e);
                    }
                    artists
                }
                Err(e) => {
                    error!("Failed to fetch artists: {}", e);
                }
            }
        }
    };

    // sort artists by name
    let mut sorted_artists = artists;
    sorted_artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if let Some(artist_search) = search {
        let search_term = artist_search.to_lowercase();
        sorted_artists.retain(|a| a.name.to_lowercase().contains(&search_term));
    }

    let table_rows: Vec<ArtistTableRow> = sorted_artists
        .into_iter()
        .map(|a| ArtistTableRow {
            name: a.name,
            id: a.id,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
