//! Bootstrap Use Case
//!
//! Creates the default administrator on the very first start and remembers
//! that it did, so that renaming the configured user later never produces a
//! second admin.

use std::sync::Arc;

use kernel::error::repo::RepoErrorKind;
use platform::password::ClearTextPassword;

use crate::application::config::{AuthConfig, BootstrapConfig};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{MarkerRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Key of the internal marker recording which user was bootstrapped
pub const FIRST_USER_MARKER: &str = "first_user";

/// What [`BootstrapUseCase::execute`] did
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The administrator was created just now. The password exists nowhere else.
    Created {
        user: User,
        password: ClearTextPassword,
    },
    /// A previous start already created the administrator
    AlreadyDone {
        user_name: String,
        /// The configured user name differs from the one that was created
        drifted: bool,
    },
}

/// Bootstrap use case
pub struct BootstrapUseCase<R>
where
    R: UserRepository + MarkerRepository,
{
    repo: Arc<R>,
    auth_config: Arc<AuthConfig>,
    config: BootstrapConfig,
}

impl<R> BootstrapUseCase<R>
where
    R: UserRepository + MarkerRepository,
{
    pub fn new(repo: Arc<R>, auth_config: Arc<AuthConfig>, config: BootstrapConfig) -> Self {
        Self {
            repo,
            auth_config,
            config,
        }
    }

    /// Ensure the default administrator exists. Any error here must abort startup.
    pub async fn execute(&self) -> AuthResult<BootstrapOutcome> {
        match self.repo.find_marker(FIRST_USER_MARKER).await {
            Ok(value) => {
                let user_name = String::from_utf8_lossy(&value).into_owned();
                // Compared as stored: the marker holds the normalized name
                let drifted = !UserName::new(&self.config.user_name)
                    .is_ok_and(|configured| configured.as_str() == user_name);

                if drifted {
                    tracing::warn!(
                        created = %user_name,
                        configured = %self.config.user_name,
                        "Configured default admin differs from the one created on first start; \
                         keeping the existing account"
                    );
                } else {
                    tracing::debug!(user_name = %user_name, "Default admin already bootstrapped");
                }

                Ok(BootstrapOutcome::AlreadyDone { user_name, drifted })
            }
            Err(e) if e.kind() == RepoErrorKind::NotFound => self.create_admin().await,
            Err(e) => Err(e.into()),
        }
    }

    async fn create_admin(&self) -> AuthResult<BootstrapOutcome> {
        let user_name = UserName::new(&self.config.user_name)?;
        let email = Email::new(&self.config.email)?;

        let password = ClearTextPassword::generate();
        let password_hash = password
            .hash(self.auth_config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let new_user = NewUser {
            user_name,
            email,
            name: String::new(),
            surname: String::new(),
            admin: true,
            active: true,
            password_hash,
        };

        let user = self
            .repo
            .create_user_with_marker(
                &new_user,
                FIRST_USER_MARKER,
                new_user.user_name.as_str().as_bytes(),
            )
            .await?;

        // The only place this password is ever shown
        tracing::warn!(
            user_name = %user.user_name,
            password = %password.expose(),
            "Created default administrator; store this password now, it will not be shown again"
        );

        Ok(BootstrapOutcome::Created { user, password })
    }
}
