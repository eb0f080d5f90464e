pub mod access;
pub mod user;

pub use access::PostgresAccessRepository;
pub use user::PostgresUserRepository;
