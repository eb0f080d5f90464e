use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenError;
use auth::TokenService;

use crate::access::ports::AccessRepository;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthServicePort;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Authentication and authorization core.
///
/// Holds no mutable state across requests: token validity is decided by
/// signature and expiry alone, and every permission check re-queries
/// the role → permission mapping.
pub struct AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    users: Arc<UR>,
    access: Arc<AR>,
    tokens: TokenService,
    password_hasher: PasswordHasher,
}

impl<UR, AR> AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    pub fn new(users: Arc<UR>, access: Arc<AR>, tokens: TokenService) -> Self {
        Self {
            users,
            access,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Load the user a verified subject names, refusing unknown ids and
    /// deactivated accounts under the same external error.
    async fn load_active_user(&self, subject: &str) -> Result<User, AuthError> {
        let user_id = UserId::from_string(subject).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a valid user id");
            AuthError::InvalidCredentials
        })?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(dependency)?
            .ok_or_else(|| {
                tracing::warn!(%user_id, "Token subject does not exist");
                AuthError::InvalidCredentials
            })?;

        if !user.is_active {
            tracing::warn!(%user_id, "Token subject is deactivated");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

fn dependency(err: UserError) -> AuthError {
    AuthError::DependencyFailure(err.to_string())
}

#[async_trait]
impl<UR, AR> AuthServicePort for AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(dependency)?
            .ok_or_else(|| {
                tracing::warn!("Login attempt for unknown email");
                AuthError::InvalidCredentials
            })?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login attempt for deactivated account");
            return Err(AuthError::InvalidCredentials);
        }

        let password_matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::DependencyFailure(e.to_string()))?;

        if !password_matches {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let subject = user.id.to_string();
        let access_token = self
            .tokens
            .issue_access(&subject)
            .map_err(|e| AuthError::DependencyFailure(e.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh(&subject)
            .map_err(|e| AuthError::DependencyFailure(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let subject = self.tokens.verify(refresh_token).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            other => {
                tracing::warn!(error = %other, "Refresh token rejected");
                AuthError::InvalidCredentials
            }
        })?;

        let user = self.load_active_user(&subject).await?;

        self.tokens
            .issue_access(&user.id.to_string())
            .map_err(|e| AuthError::DependencyFailure(e.to_string()))
    }

    async fn resolve(&self, access_token: &str) -> Result<User, AuthError> {
        // Expiry is not distinguished here: outside the refresh flow
        // every verification failure is the same credential error.
        let subject = self.tokens.verify(access_token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            AuthError::InvalidCredentials
        })?;

        self.load_active_user(&subject).await
    }

    fn require_role(&self, user: &User, expected: &str) -> Result<(), AuthError> {
        if user.role.name != expected {
            return Err(AuthError::Forbidden(format!(
                "Only {}s can perform this action",
                expected
            )));
        }
        Ok(())
    }

    async fn check_permission(
        &self,
        user: &User,
        resource: &str,
        action: &str,
    ) -> Result<bool, AuthError> {
        self.access
            .permission_exists_for_role(&user.role.id, resource, action)
            .await
            .map_err(|e| AuthError::DependencyFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::access::errors::AccessError;
    use crate::access::models::Permission;
    use crate::access::models::PermissionId;
    use crate::access::models::Role;
    use crate::access::models::RoleId;
    use crate::user::models::EmailAddress;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn set_active(&self, id: &UserId, active: bool) -> Result<(), UserError>;
        }
    }

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

    fn user_with_role(role_name: &str) -> User {
        user_with_password_hash(role_name, "$argon2id$test_hash")
    }

    fn user_with_password_hash(role_name: &str, password_hash: &str) -> User {
        User {
            id: UserId::new(),
            name: "Test User".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            role: Role {
                id: RoleId::new(),
                name: role_name.to_string(),
            },
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn service(
        users: MockTestUserRepository,
        access: MockTestAccessRepository,
    ) -> AuthService<MockTestUserRepository, MockTestAccessRepository> {
        AuthService::new(Arc::new(users), Arc::new(access), TokenService::new(SECRET))
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token_pair() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let hash = PasswordHasher::new().hash("password123").unwrap();
        let user = user_with_password_hash("client", &hash);
        let user_id = user.id;

        let returned_user = user.clone();
        users
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(users, access);

        let pair = service
            .login("a@x.com", "password123")
            .await
            .expect("Login failed");

        // Both tokens name the authenticated user
        let tokens = TokenService::new(SECRET);
        assert_eq!(tokens.verify(&pair.access_token).unwrap(), user_id.to_string());
        assert_eq!(
            tokens.verify(&pair.refresh_token).unwrap(),
            user_id.to_string()
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let hash = PasswordHasher::new().hash("password123").unwrap();
        let user = user_with_password_hash("client", &hash);

        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users, access);

        let result = service.login("a@x.com", "wrong password").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(users, access);

        let result = service.login("nobody@x.com", "password123").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_deactivated_account() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let hash = PasswordHasher::new().hash("password123").unwrap();
        let mut user = user_with_password_hash("client", &hash);
        user.is_active = false;

        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users, access);

        let result = service.login("a@x.com", "password123").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let user = user_with_role("client");
        let user_id = user.id;

        let returned_user = user.clone();
        users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(users, access);

        let refresh_token = TokenService::new(SECRET)
            .issue_refresh(&user_id.to_string())
            .unwrap();

        let access_token = service.refresh(&refresh_token).await.expect("Refresh failed");
        assert_eq!(
            TokenService::new(SECRET).verify(&access_token).unwrap(),
            user_id.to_string()
        );
    }

    #[tokio::test]
    async fn test_refresh_expired_token_is_distinguished() {
        let users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let service = service(users, access);

        // A refresh token whose 7-day window has already elapsed
        let expired = TokenService::with_ttls(
            SECRET,
            Duration::minutes(30),
            Duration::seconds(-1),
        )
        .issue_refresh(&UserId::new().to_string())
        .unwrap();

        let result = service.refresh(&expired).await;
        assert!(matches!(result.unwrap_err(), AuthError::ExpiredToken));
    }

    #[tokio::test]
    async fn test_refresh_garbage_token() {
        let users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let service = service(users, access);

        let result = service.refresh("not.a.token").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_resolve_returns_active_user() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let user = user_with_role("client");
        let user_id = user.id;

        let returned_user = user.clone();
        users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(users, access);

        let token = TokenService::new(SECRET)
            .issue_access(&user_id.to_string())
            .unwrap();

        let resolved = service.resolve(&token).await.expect("Resolve failed");
        assert_eq!(resolved.id, user_id);
    }

    #[tokio::test]
    async fn test_resolve_deactivated_user_with_valid_token() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let mut user = user_with_role("client");
        user.is_active = false;
        let user_id = user.id;

        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users, access);

        // Cryptographically valid and unexpired, yet refused
        let token = TokenService::new(SECRET)
            .issue_access(&user_id.to_string())
            .unwrap();

        let result = service.resolve(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_resolve_unknown_subject() {
        let mut users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        users
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(users, access);

        let token = TokenService::new(SECRET)
            .issue_access(&UserId::new().to_string())
            .unwrap();

        let result = service.resolve(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_resolve_expired_access_token_is_not_distinguished() {
        let users = MockTestUserRepository::new();
        let access = MockTestAccessRepository::new();

        let service = service(users, access);

        let expired = TokenService::with_ttls(SECRET, Duration::seconds(-1), Duration::days(7))
            .issue_access(&UserId::new().to_string())
            .unwrap();

        let result = service.resolve(&expired).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_require_role_exact_match() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestAccessRepository::new(),
        );

        let admin = user_with_role("admin");
        assert!(service.require_role(&admin, "admin").is_ok());

        let client = user_with_role("client");
        let result = service.require_role(&client, "admin");
        assert!(matches!(result.unwrap_err(), AuthError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_require_role_is_case_sensitive() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestAccessRepository::new(),
        );

        let user = user_with_role("Admin");
        let result = service.require_role(&user, "admin");
        assert!(matches!(result.unwrap_err(), AuthError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_check_permission_queries_role_mapping() {
        let users = MockTestUserRepository::new();
        let mut access = MockTestAccessRepository::new();

        let user = user_with_role("client");
        let role_id = user.role.id;

        access
            .expect_permission_exists_for_role()
            .withf(move |r, resource, action| {
                *r == role_id && resource == "items" && action == "read"
            })
            .times(1)
            .returning(|_, _, _| Ok(true));
        access
            .expect_permission_exists_for_role()
            .withf(move |r, resource, action| {
                *r == role_id && resource == "items" && action == "delete"
            })
            .times(1)
            .returning(|_, _, _| Ok(false));

        let service = service(users, access);

        assert!(service.check_permission(&user, "items", "read").await.unwrap());
        assert!(!service
            .check_permission(&user, "items", "delete")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_check_permission_flips_when_mapping_changes() {
        let users = MockTestUserRepository::new();
        let mut access = MockTestAccessRepository::new();

        // Every call re-queries, so a grant removed in storage is seen
        // on the next check
        let mut granted = vec![true, false].into_iter();
        access
            .expect_permission_exists_for_role()
            .times(2)
            .returning(move |_, _, _| Ok(granted.next().unwrap()));

        let service = service(users, access);
        let user = user_with_role("client");

        assert!(service.check_permission(&user, "items", "read").await.unwrap());
        assert!(!service.check_permission(&user, "items", "read").await.unwrap());
    }
}
