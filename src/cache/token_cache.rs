use std::sync::Arc;

use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::auth::exchange::fetch_access_token;
use crate::cache::token::Token;
use crate::config::settings::SpApiConfig;
use crate::error::AuthError;
use crate::utils::time::now_i64;

/// Single-slot cache for the process-wide access token.
///
/// Cloning yields a handle to the same slot. Refreshes go through a
/// dedicated mutex so concurrent callers hitting an expired token perform
/// one credential exchange; the slot lock itself is never held across the
/// network call.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<Token>>>,
    refresh: Arc<Mutex<()>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a currently valid token, refreshing via the credential
    /// exchange when the cached one is absent or expired.
    pub async fn get_token(
        &self,
        client: &Client,
        config: &SpApiConfig,
    ) -> Result<String, AuthError> {
        if let Some(value) = self.cached(now_i64()).await {
            return Ok(value);
        }

        let _refresh = self.refresh.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(value) = self.cached(now_i64()).await {
            return Ok(value);
        }

        let token = fetch_access_token(client, config).await?;
        let value = token.value.clone();
        *self.slot.write().await = Some(token);
        info!("access token refreshed");
        Ok(value)
    }

    /// Drop the cached token. Idempotent.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        if slot.take().is_some() {
            debug!("cached token invalidated");
        }
    }

    async fn cached(&self, now: i64) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid(now))
            .map(|token| token.value.clone())
    }

    #[cfg(test)]
    pub(crate) async fn expires_at(&self) -> Option<i64> {
        self.slot.read().await.as_ref().map(|token| token.expires_at)
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, token: Token) {
        *self.slot.write().await = Some(token);
    }
}
