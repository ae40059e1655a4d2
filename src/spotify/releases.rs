use reqwest::StatusCode;

use crate::{
    config::SyncConfig,
    info,
    spotify::{ApiError, Backoff, Session},
    types::{AlbumItem, AlbumsResponse, RawRelease},
};

/// Fetches the complete release list for one artist.
///
/// Offset-based pagination. Releases crediting the artist only as a guest
/// are dropped: a release belongs to the artist when its first-listed
/// (primary) artist id matches.
///
/// The retry policy wraps the whole offset walk, so either the complete
/// list is returned or an error is - a failure on page three never yields
/// the first two pages.
pub async fn get_artist_releases(
    session: &mut Session,
    artist_id: &str,
    cfg: &SyncConfig,
) -> Result<Vec<RawRelease>, ApiError> {
    let mut backoff = Backoff::new(cfg);

    loop {
        match fetch_all_release_pages(session, artist_id, cfg.page_size).await {
            Ok(releases) => return Ok(releases),
            Err(ApiError::AuthExpired) => {
                info!("Access token expired. Refreshing token...");
                session.refresh_credentials().await?;
            }
            Err(err @ ApiError::AuthUnrecoverable(_)) => return Err(err),
            Err(err @ ApiError::InvalidResponse(_)) => return Err(err),
            Err(err) => {
                if !backoff.wait().await {
                    return Err(err);
                }
            }
        }
    }
}

async fn fetch_all_release_pages(
    session: &mut Session,
    artist_id: &str,
    page_size: u32,
) -> Result<Vec<RawRelease>, ApiError> {
    let mut releases: Vec<RawRelease> = Vec::new();
    let mut offset: u32 = 0;

    loop {
        let items = fetch_release_page(session, artist_id, page_size, offset).await?;
        let fetched = items.len();

        releases.extend(
            items
                .into_iter()
                .filter(|item| item.artists.first().map(|a| a.id.as_str()) == Some(artist_id))
                .map(RawRelease::from),
        );

        // Termination counts the unfiltered page length: keep going while
        // full pages come back, so a total that is an exact multiple of the
        // page size ends on the empty page that follows.
        if fetched < page_size as usize {
            break;
        }
        offset += page_size;
    }

    Ok(releases)
}

async fn fetch_release_page(
    session: &mut Session,
    artist_id: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<AlbumItem>, ApiError> {
    let token = session.bearer().await?;

    let api_url = format!(
        "{uri}/artists/{id}/albums?include_groups=album,single,compilation&limit={limit}&offset={offset}",
        uri = session.api_url(),
        id = artist_id,
        limit = limit,
        offset = offset
    );

    let response = session.http().get(&api_url).bearer_auth(token).send().await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::AuthExpired);
    }
    if !status.is_success() {
        return Err(ApiError::Transient(format!(
            "artist-releases request failed with status {status}"
        )));
    }

    let res: AlbumsResponse = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    Ok(res.items)
}
