//! User Administration Use Case
//!
//! Listing and creating accounts is reserved to admins. Reading, editing and
//! deleting one account is allowed to admins and to the account owner.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionStore;
use crate::domain::entity::current_user::CurrentUser;
use crate::domain::entity::user::{NewUser, User, UserPatch};
use crate::domain::repository::{OwnedDataRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Create user input
pub struct CreateUserInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub admin: bool,
    pub active: bool,
}

/// Update user input; `None` leaves a field untouched
#[derive(Default)]
pub struct UpdateUserInput {
    /// Accepted only if it equals the current user name
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub admin: Option<bool>,
    pub active: Option<bool>,
}

/// User administration use case
pub struct UserAdminUseCase<U, D>
where
    U: UserRepository,
    D: OwnedDataRepository,
{
    user_repo: Arc<U>,
    owned_data: Arc<D>,
    sessions: Arc<SessionStore>,
    config: Arc<AuthConfig>,
}

impl<U, D> UserAdminUseCase<U, D>
where
    U: UserRepository,
    D: OwnedDataRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        owned_data: Arc<D>,
        sessions: Arc<SessionStore>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            owned_data,
            sessions,
            config,
        }
    }

    pub async fn list(&self, caller: CurrentUser) -> AuthResult<Vec<User>> {
        caller.require_admin()?;
        Ok(self.user_repo.list().await?)
    }

    pub async fn create(&self, caller: CurrentUser, input: CreateUserInput) -> AuthResult<User> {
        caller.require_admin()?;

        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let password_hash = ClearTextPassword::new(input.password)?
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(&NewUser {
                user_name,
                email,
                name: input.name,
                surname: input.surname,
                admin: input.admin,
                active: input.active,
                password_hash,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            created_by = %caller.user_id,
            admin = user.admin,
            "User created"
        );
        Ok(user)
    }

    pub async fn get(&self, caller: CurrentUser, id: UserId) -> AuthResult<User> {
        caller.require_self_or_admin(id)?;
        Ok(self.user_repo.find_by_id(id).await?)
    }

    pub async fn update(
        &self,
        caller: CurrentUser,
        id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        caller.require_self_or_admin(id)?;
        let existing = self.user_repo.find_by_id(id).await?;

        if input
            .user_name
            .as_deref()
            .is_some_and(|name| name != existing.user_name.as_str())
        {
            return Err(AuthError::validation("User name cannot be changed"));
        }

        if !caller.is_admin && input.admin.is_some_and(|admin| admin != existing.admin) {
            return Err(AuthError::Forbidden);
        }

        let patch = UserPatch {
            email: input.email.map(Email::new).transpose()?,
            name: input.name,
            surname: input.surname,
            admin: input.admin,
            active: input.active,
            password_hash: match input.password {
                Some(raw) => Some(
                    ClearTextPassword::new(raw)?
                        .hash(self.config.pepper())
                        .map_err(|e| AuthError::Internal(e.to_string()))?,
                ),
                None => None,
            },
        };

        let was_active = existing.active;
        let updated = self.user_repo.update(&existing.apply(patch)).await?;

        if was_active && !updated.active {
            let revoked = self.sessions.delete_all_for_owner(id);
            tracing::info!(user_id = %id, revoked, "User deactivated, sessions revoked");
        }

        tracing::info!(user_id = %id, updated_by = %caller.user_id, "User updated");
        Ok(updated)
    }

    /// Delete the account and everything it owns
    pub async fn delete(&self, caller: CurrentUser, id: UserId) -> AuthResult<()> {
        caller.require_self_or_admin(id)?;

        let removed = self.owned_data.delete_all_for_owner(id).await?;
        self.user_repo.delete(id).await?;
        let revoked = self.sessions.delete_all_for_owner(id);

        tracing::info!(
            user_id = %id,
            deleted_by = %caller.user_id,
            owned_rows_removed = removed,
            sessions_revoked = revoked,
            "User deleted"
        );
        Ok(())
    }
}
