pub mod claims;
pub mod codec;
pub mod errors;
pub mod service;

pub use claims::TokenClaims;
pub use codec::JwtCodec;
pub use errors::TokenError;
pub use service::TokenService;
