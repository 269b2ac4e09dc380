//! Check Session Use Case
//!
//! Turns a session token into an authorization decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::error::repo::RepoErrorKind;

use crate::application::session_store::SessionStore;
use crate::domain::entity::current_user::CurrentUser;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<SessionStore>,
}

impl<U> CheckSessionUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<SessionStore>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    /// Who is behind `token`, and are they an admin
    pub async fn authenticate(&self, token: &str) -> AuthResult<CurrentUser> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// [`Self::authenticate`] against an explicit clock
    pub async fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<CurrentUser> {
        let user = self.session_user_at(token, now).await?;
        Ok(CurrentUser {
            user_id: user.id,
            is_admin: user.admin,
        })
    }

    /// Like [`Self::authenticate`], but rejects non-admins
    pub async fn require_admin(&self, token: &str) -> AuthResult<CurrentUser> {
        let current = self.authenticate(token).await?;
        current.require_admin()?;
        Ok(current)
    }

    /// The full record of the session owner
    pub async fn current_user(&self, token: &str) -> AuthResult<User> {
        self.session_user_at(token, Utc::now()).await
    }

    async fn session_user_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<User> {
        // Expired entries are left in place; lookup is read-only
        let session = self
            .sessions
            .lookup(token)
            .filter(|session| !session.is_expired_at(now))
            .ok_or(AuthError::Unauthenticated)?;

        match self.user_repo.find_by_id(session.owner_id).await {
            Ok(user) => Ok(user),
            Err(e) if e.kind() == RepoErrorKind::NotFound => Err(AuthError::Internal(format!(
                "session owner {} does not exist",
                session.owner_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;
    use chrono::Duration;

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let ctx = TestContext::new().await;
        ctx.add_user("alice", "alice-password-1", false, true).await;
        let check = ctx.check_session();

        for token in ["", "never-issued", "ST=abc"] {
            assert!(matches!(
                check.authenticate(token).await,
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    #[tokio::test]
    async fn test_valid_until_expiry_instant() {
        let ctx = TestContext::new().await;
        let user = ctx.add_user("alice", "alice-password-1", false, true).await;
        let check = ctx.check_session();

        let expires_at = Utc::now() + Duration::hours(1);
        let token = ctx.sessions.create(user.id, expires_at);

        let just_before = expires_at - Duration::milliseconds(1);
        assert_eq!(
            check.authenticate_at(&token, just_before).await.unwrap().user_id,
            user.id
        );

        assert!(matches!(
            check.authenticate_at(&token, expires_at).await,
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            check.authenticate_at(&token, expires_at + Duration::hours(1)).await,
            Err(AuthError::Unauthenticated)
        ));

        // Still registered until something removes it
        assert!(ctx.sessions.lookup(&token).is_some());
    }

    #[tokio::test]
    async fn test_missing_owner_is_internal_error() {
        let ctx = TestContext::new().await;
        let token = ctx
            .sessions
            .create(kernel::id::UserId::new(404), Utc::now() + Duration::hours(1));

        let result = ctx.check_session().authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_require_admin() {
        let ctx = TestContext::new().await;
        let admin = ctx.add_user("root", "root-password-1", true, true).await;
        let member = ctx.add_user("member", "member-password-1", false, true).await;
        let check = ctx.check_session();
        let expires_at = Utc::now() + Duration::hours(1);

        let admin_token = ctx.sessions.create(admin.id, expires_at);
        let member_token = ctx.sessions.create(member.id, expires_at);

        assert_eq!(
            check.require_admin(&admin_token).await.unwrap().user_id,
            admin.id
        );
        assert!(matches!(
            check.require_admin(&member_token).await,
            Err(AuthError::Forbidden)
        ));
        assert!(matches!(
            check.require_admin("never-issued").await,
            Err(AuthError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_current_user_returns_record() {
        let ctx = TestContext::new().await;
        let user = ctx.add_user("alice", "alice-password-1", false, true).await;
        let token = ctx.sessions.create(user.id, Utc::now() + Duration::hours(1));

        let current = ctx.check_session().current_user(&token).await.unwrap();
        assert_eq!(current.user_name.as_str(), "alice");
    }
}
