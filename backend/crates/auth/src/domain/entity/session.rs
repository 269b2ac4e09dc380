//! Session Entity
//!
//! Ephemeral, never persisted. Keyed by an opaque token in the
//! [`SessionStore`](crate::application::session_store::SessionStore).

use chrono::{DateTime, Utc};
use kernel::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub owner_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(owner_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            expires_at,
        }
    }

    /// A session is valid up to, but not including, its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let expires_at = Utc::now();
        let session = Session::new(UserId::new(1), expires_at);

        assert!(!session.is_expired_at(expires_at - Duration::milliseconds(1)));
        assert!(session.is_expired_at(expires_at));
        assert!(session.is_expired_at(expires_at + Duration::seconds(1)));
    }
}
