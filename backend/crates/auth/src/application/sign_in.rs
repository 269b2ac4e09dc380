//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::error::repo::RepoErrorKind;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionStore;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<SessionStore>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<SessionStore>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions,
            config,
        }
    }

    /// Verify credentials and open a session.
    ///
    /// `previous_token` is the session cookie the browser already carried. It is
    /// deleted before the new session is created, live or expired.
    pub async fn execute(
        &self,
        input: SignInInput,
        previous_token: Option<&str>,
    ) -> AuthResult<SignInOutput> {
        if input.user_name.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::validation("User name and password are required"));
        }

        let password = ClearTextPassword::for_verification(input.password);

        // A name that could never have been registered cannot match anyone
        let Ok(user_name) = UserName::new(&input.user_name) else {
            HashedPassword::verify_nothing(&password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        let user = match self.user_repo.find_by_user_name(&user_name).await {
            Ok(user) => user,
            Err(e) if e.kind() == RepoErrorKind::NotFound => {
                HashedPassword::verify_nothing(&password, self.config.pepper());
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Checked after the password so that it reveals nothing to a guesser
        if !user.active {
            return Err(AuthError::AccountDisabled);
        }

        if let Some(previous) = previous_token {
            if self.sessions.delete(previous).is_some() {
                tracing::info!(user_id = %user.id, "Superseded previous session");
            }
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.config.session_ttl_chrono())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let session_token = self.sessions.create(user.id, expires_at);

        tracing::info!(
            user_id = %user.id,
            expires_at = %expires_at,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            expires_at,
            user,
        })
    }
}
