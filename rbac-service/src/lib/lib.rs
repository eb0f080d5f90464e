pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// domain::auth is deliberately not re-exported at the root: a root item
// named `auth` would be ambiguous with the external auth crate.
pub use domain::access;
pub use domain::user;
pub use outbound::repositories;
