use chrono::Duration;

use super::claims::TokenClaims;
use super::codec::JwtCodec;
use super::errors::TokenError;

/// Default lifetime of an access token.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
/// Default lifetime of a refresh token.
pub const REFRESH_TOKEN_EXPIRE_DAYS: i64 = 7;

/// Issues and verifies signed, time-limited access and refresh tokens.
///
/// Tokens are stateless: nothing is persisted or tracked server-side,
/// so there is no revocation. Verification depends only on the
/// cryptographic signature and the embedded expiry.
pub struct TokenService {
    codec: JwtCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service with the default 30 minute / 7 day windows.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttls(
            secret,
            Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES),
            Duration::days(REFRESH_TOKEN_EXPIRE_DAYS),
        )
    }

    /// Create a token service with explicit token lifetimes.
    pub fn with_ttls(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            codec: JwtCodec::new(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a short-lived access token for a subject.
    pub fn issue_access(&self, subject: &str) -> Result<String, TokenError> {
        self.codec
            .encode(&TokenClaims::for_subject(subject, self.access_ttl))
    }

    /// Issue a long-lived refresh token for a subject.
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        self.codec
            .encode(&TokenClaims::for_subject(subject, self.refresh_ttl))
    }

    /// Verify a token and return its subject.
    ///
    /// Succeeds only when the signature is valid, the token is not
    /// expired, and the subject claim is present.
    ///
    /// # Errors
    /// * `Expired` - the expiry window has elapsed
    /// * `Malformed` - signature mismatch or corrupt encoding
    /// * `MissingSubject` - correctly signed but no subject claim
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.codec.decode(token)?;
        claims.sub.ok_or(TokenError::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_access_token_round_trip() {
        let tokens = TokenService::new(SECRET);

        let token = tokens.issue_access("user123").expect("Failed to issue");
        let subject = tokens.verify(&token).expect("Failed to verify");

        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let tokens = TokenService::new(SECRET);

        let token = tokens.issue_refresh("user123").expect("Failed to issue");
        let subject = tokens.verify(&token).expect("Failed to verify");

        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative lifetime: every issued token is already past expiry
        let tokens = TokenService::with_ttls(SECRET, Duration::seconds(-60), Duration::days(7));

        let token = tokens.issue_access("user123").expect("Failed to issue");

        let result = tokens.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let tokens = TokenService::new(SECRET);

        let now = Utc::now();
        let claims = TokenClaims {
            sub: None,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(30)).timestamp(),
        };
        let token = JwtCodec::new(SECRET)
            .encode(&claims)
            .expect("Failed to encode");

        let result = tokens.verify(&token);
        assert!(matches!(result, Err(TokenError::MissingSubject)));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let tokens = TokenService::new(SECRET);
        let other = TokenService::new(b"a_different_secret_32_bytes_long!!");

        let token = other.issue_access("user123").expect("Failed to issue");

        let result = tokens.verify(&token);
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }
}
