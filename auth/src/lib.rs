//! Authentication primitives library
//!
//! Provides the credential and token infrastructure used by the RBAC
//! service:
//! - Password hashing and verification (Argon2id)
//! - Signed access/refresh token issuance and verification (JWT, HS256)
//!
//! The service defines its own domain ports and adapts these
//! implementations; this crate holds no storage or transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let access = tokens.issue_access("user123").unwrap();
//! let subject = tokens.verify(&access).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::JwtCodec;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenService;
