use thiserror::Error;

/// Error type for token issuance and verification.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    /// Signature is valid but the embedded expiry has passed. Surfaced
    /// distinctly so a caller knows to use a refresh token rather than
    /// retry blindly.
    #[error("Token has expired")]
    Expired,

    /// Signature mismatch, corrupt encoding, or an undecodable payload.
    #[error("Token is malformed or tampered: {0}")]
    Malformed(String),

    /// Structurally valid and correctly signed, but no subject claim.
    #[error("Token is missing the subject claim")]
    MissingSubject,
}
