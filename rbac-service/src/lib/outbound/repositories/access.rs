use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::errors::AccessError;
use crate::access::models::Permission;
use crate::access::models::PermissionId;
use crate::access::models::Role;
use crate::access::models::RoleId;
use crate::access::ports::AccessRepository;

pub struct PostgresAccessRepository {
    pool: PgPool,
}

impl PostgresAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: RoleId(row.id),
            name: row.name,
        }
    }
}

#[derive(FromRow)]
struct PermissionRow {
    id: Uuid,
    resource: String,
    action: String,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            id: PermissionId(row.id),
            resource: row.resource,
            action: row.action,
        }
    }
}

#[async_trait]
impl AccessRepository for PostgresAccessRepository {
    async fn list_roles(&self) -> Result<Vec<Role>, AccessError> {
        let rows: Vec<RoleRow> = sqlx::query_as("SELECT id, name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccessError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn create_role(&self, role: Role) -> Result<Role, AccessError> {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2)")
            .bind(role.id.0)
            .bind(&role.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AccessError::RoleAlreadyExists(role.name.clone());
                    }
                }
                AccessError::DatabaseError(e.to_string())
            })?;

        Ok(role)
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AccessError> {
        let row: Option<RoleRow> = sqlx::query_as("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccessError::DatabaseError(e.to_string()))?;

        Ok(row.map(Role::from))
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AccessError> {
        let rows: Vec<PermissionRow> =
            sqlx::query_as("SELECT id, resource, action FROM permissions ORDER BY resource, action")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AccessError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }

    async fn create_permission(&self, permission: Permission) -> Result<Permission, AccessError> {
        sqlx::query("INSERT INTO permissions (id, resource, action) VALUES ($1, $2, $3)")
            .bind(permission.id.0)
            .bind(&permission.resource)
            .bind(&permission.action)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AccessError::PermissionAlreadyExists {
                            resource: permission.resource.clone(),
                            action: permission.action.clone(),
                        };
                    }
                }
                AccessError::DatabaseError(e.to_string())
            })?;

        Ok(permission)
    }

    async fn grant_permission(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<(), AccessError> {
        sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
            .bind(role_id.0)
            .bind(permission_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AccessError::PermissionAlreadyAssigned;
                    }
                    if db_err.is_foreign_key_violation() {
                        // Which half of the pair was missing
                        return match db_err.constraint() {
                            Some("role_permissions_permission_id_fkey") => {
                                AccessError::PermissionNotFound(permission_id.to_string())
                            }
                            _ => AccessError::RoleNotFound(role_id.to_string()),
                        };
                    }
                }
                AccessError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn permission_exists_for_role(
        &self,
        role_id: &RoleId,
        resource: &str,
        action: &str,
    ) -> Result<bool, AccessError> {
        // Pure existence test, re-run on every check
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM role_permissions rp
                JOIN permissions p ON p.id = rp.permission_id
                WHERE rp.role_id = $1 AND p.resource = $2 AND p.action = $3
            )
            "#,
        )
        .bind(role_id.0)
        .bind(resource)
        .bind(action)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccessError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }
}
