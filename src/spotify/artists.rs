use reqwest::StatusCode;

use crate::{
    config::SyncConfig,
    info,
    spotify::{ApiError, Backoff, Session},
    types::{Artist, FollowedArtistsResponse},
};

/// Enumerates every artist the user follows.
///
/// Cursor-based pagination: each page returns up to `cfg.page_size` artists
/// plus an opaque `after` cursor; an absent cursor ends the walk. Pages are
/// fetched through the retry policy - an expired token is refreshed and the
/// same page retried immediately, transient failures consume the backoff
/// budget, and a malformed page is fatal without retry.
pub async fn get_followed_artists(
    session: &mut Session,
    cfg: &SyncConfig,
) -> Result<Vec<Artist>, ApiError> {
    let mut artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;
    let mut backoff = Backoff::new(cfg);

    loop {
        match fetch_artist_page(session, cfg.page_size, after.as_deref()).await {
            Ok((page, next_after)) => {
                if page.is_empty() {
                    break;
                }
                artists.extend(page);
                match next_after {
                    Some(cursor) => after = Some(cursor),
                    None => break,
                }
            }
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

    Ok(artists)
}

async fn fetch_artist_page(
    session: &mut Session,
    limit: u32,
    after: Option<&str>,
) -> Result<(Vec<Artist>, Option<String>), ApiError> {
    let token = session.bearer().await?;

    let mut api_url = format!(
        "{uri}/me/following?type=artist&limit={limit}",
        uri = session.api_url(),
        limit = limit
    );
    if let Some(after_val) = after {
        api_url.push_str(&format!("&after={}", after_val));
    }

    let response = session.http().get(&api_url).bearer_auth(token).send().await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::AuthExpired);
    }
    if !status.is_success() {
        return Err(ApiError::Transient(format!(
            "followed-artists request failed with status {status}"
        )));
    }

    let res: FollowedArtistsResponse = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    let next_after = res.artists.cursors.and_then(|c| c.after);
    Ok((res.artists.items, next_after))
}
