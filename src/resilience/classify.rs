use reqwest::StatusCode;
use serde_json::Value;

/// Classification of a failed attempt, driving the retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 401/403: invalidate the token; retried immediately on the first
    /// attempt only.
    Auth,
    /// 429: retry after backoff.
    RateLimited,
    /// 5xx: retry after backoff.
    Server,
    /// Other 4xx: not retryable.
    Client,
    /// No HTTP response at all (connect error, timeout, failed token fetch).
    Network,
}

/// One failed attempt, retained to build the final error when the loop
/// exhausts or aborts.
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    pub class: FailureClass,
    pub status: Option<StatusCode>,
    /// Raw response body for HTTP failures, transport message otherwise.
    pub detail: String,
}

impl AttemptFailure {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let class = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureClass::Auth,
            StatusCode::TOO_MANY_REQUESTS => FailureClass::RateLimited,
            s if s.is_server_error() => FailureClass::Server,
            _ => FailureClass::Client,
        };
        Self {
            class,
            status: Some(status),
            detail: body,
        }
    }

    pub fn network(message: String) -> Self {
        Self {
            class: FailureClass::Network,
            status: None,
            detail: message,
        }
    }

    /// Final error message. Precedence: first message of the structured
    /// `errors` list, then the top-level `message` field, then the
    /// transport error text, then a generic placeholder.
    pub fn message(&self) -> String {
        if let Some(status) = self.status {
            if let Ok(payload) = serde_json::from_str::<Value>(&self.detail) {
                if let Some(msg) = payload
                    .get("errors")
                    .and_then(|errors| errors.get(0))
                    .and_then(|first| first.get("message"))
                    .and_then(Value::as_str)
                {
                    return msg.to_string();
                }
                if let Some(msg) = payload.get("message").and_then(Value::as_str) {
                    return msg.to_string();
                }
            }
            return format!("Request failed with status code {}", status.as_u16());
        }

        if !self.detail.is_empty() {
            return self.detail.clone();
        }
        "Unknown error".to_string()
    }
}
