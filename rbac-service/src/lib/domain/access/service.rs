use std::sync::Arc;

use async_trait::async_trait;

use crate::access::errors::AccessError;
use crate::access::models::Permission;
use crate::access::models::PermissionId;
use crate::access::models::Role;
use crate::access::models::RoleId;
use crate::access::ports::AccessRepository;
use crate::access::ports::AccessServicePort;

/// Domain service for role and permission administration.
///
/// Thin coordination over the repository: uniqueness conflicts are
/// detected by the storage constraints at commit time and passed
/// through as recoverable errors.
pub struct AccessService<AR>
where
    AR: AccessRepository,
{
    repository: Arc<AR>,
}

impl<AR> AccessService<AR>
where
    AR: AccessRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> AccessServicePort for AccessService<AR>
where
    AR: AccessRepository,
{
    async fn list_roles(&self) -> Result<Vec<Role>, AccessError> {
        self.repository.list_roles().await
    }

    async fn create_role(&self, name: String) -> Result<Role, AccessError> {
        let role = Role {
            id: RoleId::new(),
            name,
        };

        let created = self.repository.create_role(role).await?;
        tracing::info!(role = %created.name, "Role created");

        Ok(created)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AccessError> {
        self.repository.list_permissions().await
    }

    async fn create_permission(
        &self,
        resource: String,
        action: String,
    ) -> Result<Permission, AccessError> {
        let permission = Permission {
            id: PermissionId::new(),
            resource,
            action,
        };

        let created = self.repository.create_permission(permission).await?;
        tracing::info!(
            resource = %created.resource,
            action = %created.action,
            "Permission created"
        );

        Ok(created)
    }

    async fn grant_permission(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<(), AccessError> {
        self.repository
            .grant_permission(role_id, permission_id)
            .await?;
        tracing::info!(%role_id, %permission_id, "Permission granted to role");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestAccessRepository {}

        #[async_trait]
        impl AccessRepository for TestAccessRepository {
            async fn list_roles(&self) -> Result<Vec<Role>, AccessError>;
            async fn create_role(&self, role: Role) -> Result<Role, AccessError>;
            async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AccessError>;
            async fn list_permissions(&self) -> Result<Vec<Permission>, AccessError>;
            async fn create_permission(&self, permission: Permission) -> Result<Permission, AccessError>;
            async fn grant_permission(&self, role_id: &RoleId, permission_id: &PermissionId) -> Result<(), AccessError>;
            async fn permission_exists_for_role(&self, role_id: &RoleId, resource: &str, action: &str) -> Result<bool, AccessError>;
        }
    }

    #[tokio::test]
    async fn test_create_role_success() {
        let mut repository = MockTestAccessRepository::new();

        repository
            .expect_create_role()
            .withf(|role| role.name == "moderator")
            .times(1)
            .returning(|role| Ok(role));

        let service = AccessService::new(Arc::new(repository));

        let result = service.create_role("moderator".to_string()).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().name, "moderator");
    }

    #[tokio::test]
    async fn test_create_role_duplicate_name() {
        let mut repository = MockTestAccessRepository::new();

        repository
            .expect_create_role()
            .times(1)
            .returning(|role| Err(AccessError::RoleAlreadyExists(role.name)));

        let service = AccessService::new(Arc::new(repository));

        let result = service.create_role("admin".to_string()).await;
        assert!(matches!(
            result.unwrap_err(),
            AccessError::RoleAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_permission_duplicate_pair() {
        let mut repository = MockTestAccessRepository::new();

        repository
            .expect_create_permission()
            .times(1)
            .returning(|permission| {
                Err(AccessError::PermissionAlreadyExists {
                    resource: permission.resource,
                    action: permission.action,
                })
            });

        let service = AccessService::new(Arc::new(repository));

        let result = service
            .create_permission("items".to_string(), "read".to_string())
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccessError::PermissionAlreadyExists { .. }
        ));
    }

    #[tokio::test]
    async fn test_grant_permission_success() {
        let mut repository = MockTestAccessRepository::new();

        let role_id = RoleId::new();
        let permission_id = PermissionId::new();

        repository
            .expect_grant_permission()
            .withf(move |r, p| *r == role_id && *p == permission_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AccessService::new(Arc::new(repository));

        let result = service.grant_permission(&role_id, &permission_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_grant_permission_already_assigned() {
        let mut repository = MockTestAccessRepository::new();

        repository
            .expect_grant_permission()
            .times(1)
            .returning(|_, _| Err(AccessError::PermissionAlreadyAssigned));

        let service = AccessService::new(Arc::new(repository));

        let result = service
            .grant_permission(&RoleId::new(), &PermissionId::new())
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccessError::PermissionAlreadyAssigned
        ));
    }
}
