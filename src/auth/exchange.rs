use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::cache::token::{Token, DEFAULT_EXPIRES_IN_SECONDS};
use crate::config::settings::{SpApiConfig, EXCHANGE_TIMEOUT};
use crate::error::AuthError;
use crate::utils::time::now_i64;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error_description: Option<String>,
}

/// Exchange the long-lived refresh token for a short-lived access token
/// (refresh-token grant against the LWA endpoint).
///
/// Timeouts surface as network-class failures, same as any other
/// transport error.
pub async fn fetch_access_token(
    client: &Client,
    config: &SpApiConfig,
) -> Result<Token, AuthError> {
    let fetched_at = now_i64();
    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", config.refresh_token.as_str()),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
    ];

    let response = client
        .post(&config.auth_url)
        .form(&form)
        .timeout(EXCHANGE_TIMEOUT)
        .send()
        .await
        .map_err(|err| AuthError::new(err.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AuthError::new(err.to_string()))?;

    if !status.is_success() {
        let description = serde_json::from_str::<TokenErrorResponse>(&body)
            .ok()
            .and_then(|payload| payload.error_description)
            .unwrap_or_else(|| format!("token endpoint returned {}", status));
        return Err(AuthError::new(description));
    }

    let payload: TokenResponse = serde_json::from_str(&body)
        .map_err(|err| AuthError::new(format!("malformed token response: {}", err)))?;

    let expires_in = payload.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECONDS);
    debug!("token exchange succeeded, expires_in {}s", expires_in);
    Ok(Token::from_expires_in(
        payload.access_token,
        fetched_at,
        expires_in,
    ))
}
