/// Token pair handed to the caller on login.
///
/// The service keeps no session state; both tokens are self-contained
/// signed values and validity is decided at verification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived credential for authenticated requests
    pub access_token: String,
    /// Long-lived credential exchanged for new access tokens
    pub refresh_token: String,
}
