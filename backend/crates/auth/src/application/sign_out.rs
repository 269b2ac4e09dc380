//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::session_store::SessionStore;

/// Sign out use case
pub struct SignOutUseCase {
    sessions: Arc<SessionStore>,
}

impl SignOutUseCase {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Remove the session behind `token`. Unknown tokens are fine.
    pub fn execute(&self, session_token: &str) {
        if let Some(session) = self.sessions.delete(session_token) {
            tracing::info!(user_id = %session.owner_id, "User signed out");
        }
    }
}
