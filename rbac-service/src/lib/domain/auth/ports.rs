use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;
use crate::user::models::User;

/// Port for the authentication and authorization core.
///
/// The transport layer depends on this trait only; the implementation
/// coordinates credential verification, token lifecycle, identity
/// resolution, and the role/permission gates.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown email, wrong password, or
    ///   inactive account (undifferentiated externally)
    /// * `DependencyFailure` - storage or hashing infrastructure failed
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `ExpiredToken` - the refresh token's window has elapsed
    /// * `InvalidCredentials` - malformed token, unknown subject, or
    ///   inactive account
    /// * `DependencyFailure` - storage operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Resolve a bearer access token to the active user it names.
    ///
    /// Any verification failure (including expiry), an unknown subject,
    /// and a deactivated account are all `InvalidCredentials` here: an
    /// inactive account is indistinguishable from an invalid token.
    async fn resolve(&self, access_token: &str) -> Result<User, AuthError>;

    /// Coarse role gate: exact, case-sensitive role name comparison.
    ///
    /// # Errors
    /// * `Forbidden` - the user's role name differs from `expected`
    fn require_role(&self, user: &User, expected: &str) -> Result<(), AuthError>;

    /// Fine-grained permission gate: true iff the user's role holds a
    /// permission matching (resource, action) exactly. Re-queries the
    /// mapping on every call; no caching.
    async fn check_permission(
        &self,
        user: &User,
        resource: &str,
        action: &str,
    ) -> Result<bool, AuthError>;
}
