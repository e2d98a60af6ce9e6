use std::fmt;

/// Credential exchange against the LWA token endpoint failed.
///
/// The message prefers the upstream `error_description` field and falls
/// back to the raw transport error text.
#[derive(Debug, Clone)]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to authenticate with Amazon SP-API: {}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// The retry loop exhausted its attempts or hit a non-retryable response.
///
/// The message follows a fixed precedence: first message of the upstream
/// structured error list, then the upstream top-level message field, then
/// the transport error text, then a generic placeholder.
#[derive(Debug, Clone)]
pub struct RequestError {
    message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SP-API request failed: {}", self.message)
    }
}

impl std::error::Error for RequestError {}
