use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::config::endpoints::{resolve_base_url, DEFAULT_REGION};

/// LWA credential exchange endpoint.
pub const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

/// Bound on a single credential exchange call.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Total bound on a single target API call, independent of backoff delays.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// ================================
/// Client-wide settings
/// ================================
///
/// One credential set per process lifetime, passed explicitly into the
/// token cache and the executor at construction.
#[derive(Debug, Clone)]
pub struct SpApiConfig {
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    /// Region identifier mapped through the fixed endpoint registry.
    pub region: String,
    /// Marketplace used by request builders when the caller passes none.
    pub marketplace_id: String,
    /// Credential exchange endpoint, overridable for tests.
    pub auth_url: String,
    /// Overrides the registry-resolved base URL when set.
    pub endpoint_override: Option<String>,
}

impl SpApiConfig {
    pub fn new(
        refresh_token: String,
        client_id: String,
        client_secret: String,
        region: String,
        marketplace_id: String,
    ) -> Self {
        Self {
            refresh_token,
            client_id,
            client_secret,
            region,
            marketplace_id,
            auth_url: LWA_TOKEN_URL.to_string(),
            endpoint_override: None,
        }
    }

    /// Read the configuration once from the `SP_API_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            env::var("SP_API_REFRESH_TOKEN").context("SP_API_REFRESH_TOKEN is not set")?,
            env::var("SP_API_CLIENT_ID").context("SP_API_CLIENT_ID is not set")?,
            env::var("SP_API_CLIENT_SECRET").context("SP_API_CLIENT_SECRET is not set")?,
            env::var("SP_API_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            env::var("SP_API_MARKETPLACE_ID").unwrap_or_default(),
        ))
    }

    /// Regional base URL for the target API.
    pub fn base_url(&self) -> &str {
        self.endpoint_override
            .as_deref()
            .unwrap_or_else(|| resolve_base_url(&self.region))
    }
}

/// ================================
/// Retry policy
/// ================================
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total tries per logical request, not retries after the first.
    pub max_attempts: u32,
    /// Unit the exponential backoff is computed in. One second in
    /// production so the delay is `2^attempt` seconds.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff after a failed attempt (1-based): `2^attempt` units.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * 2u32.pow(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn backoff_is_exponential_in_attempt_number() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
    }

    #[test]
    #[serial]
    fn from_env_reads_credentials() {
        env::set_var("SP_API_REFRESH_TOKEN", "rt");
        env::set_var("SP_API_CLIENT_ID", "cid");
        env::set_var("SP_API_CLIENT_SECRET", "cs");
        env::set_var("SP_API_REGION", "us-east-1");
        env::set_var("SP_API_MARKETPLACE_ID", "ATVPDKIKX0DER");

        let cfg = SpApiConfig::from_env().unwrap();
        assert_eq!(cfg.refresh_token, "rt");
        assert_eq!(cfg.client_id, "cid");
        assert_eq!(cfg.client_secret, "cs");
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.marketplace_id, "ATVPDKIKX0DER");
        assert_eq!(cfg.base_url(), "https://sellingpartnerapi-na.amazon.com");
    }

    #[test]
    #[serial]
    fn from_env_defaults_region_when_unset() {
        env::set_var("SP_API_REFRESH_TOKEN", "rt");
        env::set_var("SP_API_CLIENT_ID", "cid");
        env::set_var("SP_API_CLIENT_SECRET", "cs");
        env::remove_var("SP_API_REGION");
        env::remove_var("SP_API_MARKETPLACE_ID");

        let cfg = SpApiConfig::from_env().unwrap();
        assert_eq!(cfg.region, DEFAULT_REGION);
        assert_eq!(cfg.base_url(), "https://sellingpartnerapi-eu.amazon.com");
    }

    #[test]
    #[serial]
    fn from_env_fails_without_refresh_token() {
        env::remove_var("SP_API_REFRESH_TOKEN");
        env::set_var("SP_API_CLIENT_ID", "cid");
        env::set_var("SP_API_CLIENT_SECRET", "cs");

        let err = SpApiConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SP_API_REFRESH_TOKEN"));
    }

    #[test]
    fn endpoint_override_wins_over_registry() {
        let mut cfg = SpApiConfig::new(
            "rt".into(),
            "cid".into(),
            "cs".into(),
            "eu-west-1".into(),
            String::new(),
        );
        cfg.endpoint_override = Some("http://127.0.0.1:4545".into());
        assert_eq!(cfg.base_url(), "http://127.0.0.1:4545");
    }
}
