use chrono::Utc;
use reqwest::Client;

use crate::{management::CacheManager, spotify::ApiError, types::Token, warning};

// Refresh this many seconds before the token actually expires.
const EXPIRY_SLACK_SECS: u64 = 240;

/// Owns the persisted token record and refreshes it on demand.
///
/// The token endpoint and client id are threaded in at construction instead
/// of being read from ambient state, so a session under test can point at a
/// local mock service.
pub struct TokenManager {
    token: Token,
    token_url: String,
    client_id: String,
    cache: CacheManager,
}

impl TokenManager {
    pub fn new(token: Token, cache: CacheManager, token_url: String, client_id: String) -> Self {
        Self {
            token,
            token_url,
            client_id,
            cache,
        }
    }

    /// Loads the stored token record from the cache store.
    pub async fn load(
        cache: CacheManager,
        token_url: String,
        client_id: String,
    ) -> Result<Self, String> {
        match cache.load_token().await {
            Some(token) => Ok(Self {
                token,
                token_url,
                client_id,
                cache,
            }),
            None => Err("no stored token found".to_string()),
        }
    }

    /// Returns a bearer token, refreshing first when the stored one is at or
    /// near expiry.
    pub async fn get_valid_token(&mut self) -> Result<String, ApiError> {
        if self.is_expired() {
            self.refresh().await?;
        }
        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_SLACK_SECS >= self.token.obtained_at + self.token.expires_in
    }

    /// Exchanges the stored refresh token for a fresh access token and
    /// persists the result.
    ///
    /// Any failure here is unrecoverable for the current run: without a
    /// working refresh credential no catalog call can be authenticated.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        if self.token.refresh_token.is_empty() {
            return Err(ApiError::AuthUnrecoverable(
                "no refresh token stored".to_string(),
            ));
        }

        let client = Client::new();
        let res = client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.token.refresh_token),
                ("client_id", &self.client_id),
            ])
            .send()
            .await
            .map_err(|e| ApiError::AuthUnrecoverable(e.to_string()))?;

        if !res.status().is_success() {
            return Err(ApiError::AuthUnrecoverable(format!(
                "token refresh rejected with status {}",
                res.status()
            )));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| ApiError::AuthUnrecoverable(e.to_string()))?;

        let Some(access_token) = json["access_token"].as_str() else {
            return Err(ApiError::AuthUnrecoverable(
                "token refresh response missing access_token".to_string(),
            ));
        };

        // the service may or may not rotate the refresh token; keep the
        // stored one unless a new one is issued
        let refresh_token = json["refresh_token"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| self.token.refresh_token.clone());
        let scope = json["scope"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| self.token.scope.clone());

        self.token = Token {
            access_token: access_token.to_string(),
            refresh_token,
            scope,
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        };

        if let Err(e) = self.cache.save_token(&self.token).await {
            warning!("Cannot persist refreshed token: {:?}", e);
        }

        Ok(())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
