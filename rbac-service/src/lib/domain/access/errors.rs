use thiserror::Error;

/// Error for role/permission id parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for role and permission administration
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] AccessIdError),

    #[error("Role already exists: {0}")]
    RoleAlreadyExists(String),

    #[error("Permission already exists: {resource}:{action}")]
    PermissionAlreadyExists { resource: String, action: String },

    #[error("Permission already assigned")]
    PermissionAlreadyAssigned,

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Permission not found: {0}")]
    PermissionNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
