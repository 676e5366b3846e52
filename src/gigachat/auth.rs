//! GigaChat OAuth2 token management
//!
//! Client-credentials exchange against the Sberbank OAuth endpoint with an
//! in-process token cache. Tokens carry an absolute expiry in epoch
//! milliseconds; an expired or missing token is refreshed on demand, the
//! exchange itself is retried on transient failures.

use crate::errors::{BotError, Result};
use crate::gigachat::types::TokenResponse;
use crate::retry::RetryManager;
use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Cached access token with absolute expiry
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at_ms: i64,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }
}

/// OAuth token manager with in-process cache
pub struct TokenManager {
    auth_key: String,
    scope: String,
    oauth_url: String,
    cached: Mutex<Option<CachedToken>>,
    retry: RetryManager,
}

impl TokenManager {
    /// Create a token manager for the given credentials
    pub fn new(auth_key: String, scope: String, oauth_url: String) -> Self {
        Self {
            auth_key,
            scope,
            oauth_url,
            cached: Mutex::new(None),
            retry: RetryManager::new(),
        }
    }

    /// Return a valid access token, fetching a fresh one when the cache
    /// is empty or expired.
    pub async fn token(&self, http: &Client) -> Result<String> {
        let mut guard = self.cached.lock().await;

        if let Some(cached) = guard.as_ref() {
            if !cached.is_expired() {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.retry.execute_with_retry(|| self.fetch(http)).await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }

    /// Discard the cached token and fetch a new one. Used after the API
    /// rejects a token that has not reached its advertised expiry.
    pub async fn refresh(&self, http: &Client) -> Result<String> {
        let mut guard = self.cached.lock().await;

        let fresh = self.retry.execute_with_retry(|| self.fetch(http)).await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }

    /// Perform the OAuth exchange
    async fn fetch(&self, http: &Client) -> Result<CachedToken> {
        let rquid = Uuid::new_v4().to_string();

        let response = http
            .post(&self.oauth_url)
            .header("Accept", "application/json")
            .header("RqUID", rquid)
            .header("Authorization", format!("Basic {}", self.auth_key))
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BotError::Auth(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BotError::GigaChatApi(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| BotError::Auth(format!("failed to parse token response: {}", e)))?;

        tracing::info!("obtained GigaChat access token");

        Ok(CachedToken {
            token: token.access_token,
            expires_at_ms: token.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_token() {
        let token = CachedToken {
            token: "t".to_string(),
            expires_at_ms: Utc::now().timestamp_millis() - 1,
        };
        assert!(token.is_expired());
    }

    #[test]
    fn test_live_token() {
        let token = CachedToken {
            token: "t".to_string(),
            expires_at_ms: Utc::now().timestamp_millis() + 60_000,
        };
        assert!(!token.is_expired());
    }

    #[tokio::test]
    #[ignore] // Requires GigaChat credentials in the environment
    async fn test_fetch_integration() {
        let manager = TokenManager::new(
            std::env::var("GIGACHAT_AUTHORIZATION_KEY").unwrap(),
            std::env::var("GIGACHAT_SCOPE").unwrap(),
            crate::config::DEFAULT_GIGACHAT_OAUTH_URL.to_string(),
        );
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap();
        assert!(manager.token(&http).await.is_ok());
    }
}
