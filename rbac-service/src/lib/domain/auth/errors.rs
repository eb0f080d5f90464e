use thiserror::Error;

/// Error taxonomy for authentication and authorization decisions.
///
/// Wrong password, malformed or tampered token, unknown subject, and
/// inactive account all collapse into `InvalidCredentials` externally
/// so a caller cannot enumerate accounts; the internal cause is logged
/// where the failure is detected.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    /// Distinguished from `InvalidCredentials` so a client knows to
    /// re-authenticate rather than retry; only the refresh flow
    /// surfaces it.
    #[error("Token has expired")]
    ExpiredToken,

    /// Identity is known and valid but authorization is insufficient.
    #[error("{0}")]
    Forbidden(String),

    #[error("Dependency failure: {0}")]
    DependencyFailure(String),
}
