use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::access::ports::AccessRepository;
use crate::user::errors::UserError;
use crate::user::models::RegisterUserCommand;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user lifecycle operations.
///
/// Registration resolves the requested role name against storage and
/// stores only the password digest, never the plaintext.
pub struct UserService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    repository: Arc<UR>,
    access_repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, AR> UserService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    pub fn new(repository: Arc<UR>, access_repository: Arc<AR>) -> Self {
        Self {
            repository,
            access_repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR, AR> UserServicePort for UserService<UR, AR>
where
    UR: UserRepository,
    AR: AccessRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let role = self
            .access_repository
            .find_role_by_name(&command.role_name)
            .await
            .map_err(UserError::from)?
            .ok_or_else(|| UserError::RoleNotFound(command.role_name.clone()))?;

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            role,
            is_active: true,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, role = %created.role.name, "User registered");

        Ok(created)
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(new_password.as_str())
                .map_err(|e| UserError::Hashing(e.to_string()))?;
        }

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, "Profile updated");

        Ok(updated)
    }

    async fn deactivate(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.set_active(id, false).await?;
        tracing::info!(user_id = %id, "User deactivated");

        Ok(())
    }
}
