//! Current User
//!
//! The authorization decision for one request, inserted into request
//! extensions by the session middleware.

use kernel::id::UserId;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn require_admin(&self) -> AuthResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Admins may act on any account, everyone else only on their own
    pub fn require_self_or_admin(&self, target: UserId) -> AuthResult<()> {
        if self.is_admin || self.user_id == target {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_may_act_on_anyone() {
        let admin = CurrentUser {
            user_id: UserId::new(1),
            is_admin: true,
        };
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_self_or_admin(UserId::new(2)).is_ok());
    }

    #[test]
    fn test_user_may_act_only_on_self() {
        let user = CurrentUser {
            user_id: UserId::new(2),
            is_admin: false,
        };
        assert!(matches!(user.require_admin(), Err(AuthError::Forbidden)));
        assert!(user.require_self_or_admin(UserId::new(2)).is_ok());
        assert!(matches!(
            user.require_self_or_admin(UserId::new(1)),
            Err(AuthError::Forbidden)
        ));
    }
}
