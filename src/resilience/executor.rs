use reqwest::{Client, Method};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::cache::token_cache::TokenCache;
use crate::config::settings::{RetryPolicy, SpApiConfig, REQUEST_TIMEOUT};
use crate::error::RequestError;
use crate::resilience::classify::{AttemptFailure, FailureClass};

const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

/// Retrying request executor.
///
/// Resolves the regional endpoint, attaches the bearer token from the
/// cache and drives the bounded retry loop. Each logical request carries
/// its own attempt state; the only shared state is the token cache.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    cache: TokenCache,
    config: SpApiConfig,
    retry: RetryPolicy,
}

impl RequestExecutor {
    pub fn new(config: SpApiConfig, cache: TokenCache) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            cache,
            config,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy. Tests shrink the backoff unit; the delay
    /// formula itself is fixed.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &SpApiConfig {
        &self.config
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Issue one logical request, retrying per the failure classification.
    ///
    /// Any 2xx short-circuits the loop and returns the decoded body. A
    /// 401/403 invalidates the cached token and retries immediately on the
    /// first attempt only; 429/5xx/network failures back off `2^attempt`
    /// units while attempts remain; other 4xx abort at once.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<Value, RequestError> {
        let url = format!("{}{}", self.config.base_url(), path);
        let mut last_failure: Option<AttemptFailure> = None;

        for attempt in 1..=self.retry.max_attempts {
            let failure = match self.attempt(&method, &url, body, query).await {
                Ok(decoded) => return Ok(decoded),
                Err(failure) => failure,
            };
            let class = failure.class;
            last_failure = Some(failure);

            match class {
                FailureClass::Auth => {
                    self.cache.invalidate().await;
                    if attempt == 1 {
                        warn!("auth error, refreshing token and retrying");
                        continue;
                    }
                    // A recurring auth failure is final; no third token fetch.
                    break;
                }
                FailureClass::RateLimited | FailureClass::Server | FailureClass::Network
                    if attempt < self.retry.max_attempts =>
                {
                    let delay = self.retry.backoff_for(attempt);
                    warn!(
                        "attempt {}/{} failed ({:?}), retrying in {:?}",
                        attempt, self.retry.max_attempts, class, delay
                    );
                    sleep(delay).await;
                }
                _ => {
                    debug!("not retrying ({:?}) on attempt {}", class, attempt);
                    break;
                }
            }
        }

        let message = last_failure
            .map(|failure| failure.message())
            .unwrap_or_else(|| "Unknown error".to_string());
        error!("request to {} failed: {}", path, message);
        Err(RequestError::new(message))
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<Value, AttemptFailure> {
        // A failed token fetch has no HTTP response from the target API,
        // so it rides the network classification.
        let token = self
            .cache
            .get_token(&self.client, &self.config)
            .await
            .map_err(|err| AttemptFailure::network(err.to_string()))?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCESS_TOKEN_HEADER, token)
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AttemptFailure::network(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AttemptFailure::network(err.to_string()))?;

        if status.is_success() {
            return Ok(decode_body(&text));
        }
        Err(AttemptFailure::from_status(status, text))
    }
}

/// 2xx bodies are JSON in practice; empty bodies decode to null and
/// non-JSON text passes through as a string value.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
