/// Safety margin subtracted from the server-reported lifetime so a token
/// is never attached to a call right as it expires.
pub const SAFETY_MARGIN_SECONDS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECONDS: i64 = 3600;

/// Access token holding the bearer value and computed expiration.
#[derive(Debug, Clone)]
pub struct Token {
    pub value: String,
    pub expires_at: i64, // UNIX timestamp
}

impl Token {
    /// Build a token from the server-reported `expires_in`, applying the
    /// safety margin up front.
    pub fn from_expires_in(value: String, fetched_at: i64, expires_in: i64) -> Self {
        Self {
            value,
            expires_at: fetched_at + expires_in - SAFETY_MARGIN_SECONDS,
        }
    }

    /// Usable only strictly before `expires_at`.
    pub fn is_valid(&self, now: i64) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_applies_safety_margin() {
        let token = Token::from_expires_in("abc".into(), 1_000, 3600);
        assert_eq!(token.expires_at, 1_000 + 3600 - 60);
    }

    #[test]
    fn validity_is_strict() {
        let token = Token::from_expires_in("abc".into(), 1_000, 100);
        // expires_at = 1040
        assert!(token.is_valid(1_039));
        assert!(!token.is_valid(1_040));
        assert!(!token.is_valid(2_000));
    }
}
