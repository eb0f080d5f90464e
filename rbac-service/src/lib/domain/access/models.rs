use std::fmt;

use uuid::Uuid;

use crate::access::errors::AccessIdError;

/// Named access tier. Users hold exactly one role; permissions are
/// granted to roles, never to users directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub Uuid);

impl RoleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, AccessIdError> {
        Uuid::parse_str(s)
            .map(RoleId)
            .map_err(|e| AccessIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An allowed (resource, action) pair, e.g. ("items", "read").
///
/// The pair is the unit of permission granularity; matching is exact
/// and case-sensitive, with no wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub id: PermissionId,
    pub resource: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionId(pub Uuid);

impl PermissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, AccessIdError> {
        Uuid::parse_str(s)
            .map(PermissionId)
            .map_err(|e| AccessIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
