use async_trait::async_trait;

use crate::access::errors::AccessError;
use crate::access::models::Permission;
use crate::access::models::PermissionId;
use crate::access::models::Role;
use crate::access::models::RoleId;

/// Port for role and permission administration.
#[async_trait]
pub trait AccessServicePort: Send + Sync + 'static {
    /// List all roles.
    async fn list_roles(&self) -> Result<Vec<Role>, AccessError>;

    /// Create a new role with a unique name.
    ///
    /// # Errors
    /// * `RoleAlreadyExists` - name is already taken
    /// * `DatabaseError` - storage operation failed
    async fn create_role(&self, name: String) -> Result<Role, AccessError>;

    /// List all permissions.
    async fn list_permissions(&self) -> Result<Vec<Permission>, AccessError>;

    /// Create a new (resource, action) permission.
    ///
    /// # Errors
    /// * `PermissionAlreadyExists` - the pair already exists
    /// * `DatabaseError` - storage operation failed
    async fn create_permission(
        &self,
        resource: String,
        action: String,
    ) -> Result<Permission, AccessError>;

    /// Grant an existing permission to an existing role.
    ///
    /// # Errors
    /// * `PermissionAlreadyAssigned` - the role already holds it
    /// * `RoleNotFound` / `PermissionNotFound` - unknown identifiers
    /// * `DatabaseError` - storage operation failed
    async fn grant_permission(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<(), AccessError>;
}

/// Persistence operations for roles, permissions, and their mapping.
///
/// Uniqueness of role names, (resource, action) pairs, and
/// (role, permission) grants is enforced atomically by the storage
/// layer; a violation surfaces as the matching conflict error.
#[async_trait]
pub trait AccessRepository: Send + Sync + 'static {
    async fn list_roles(&self) -> Result<Vec<Role>, AccessError>;

    async fn create_role(&self, role: Role) -> Result<Role, AccessError>;

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AccessError>;

    async fn list_permissions(&self) -> Result<Vec<Permission>, AccessError>;

    async fn create_permission(&self, permission: Permission) -> Result<Permission, AccessError>;

    async fn grant_permission(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<(), AccessError>;

    /// Pure existence test over the role → permission mapping: true iff
    /// the role holds a permission matching (resource, action) exactly.
    async fn permission_exists_for_role(
        &self,
        role_id: &RoleId,
        resource: &str,
        action: &str,
    ) -> Result<bool, AccessError>;
}
