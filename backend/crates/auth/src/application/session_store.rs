//! Session Store
//!
//! Process-wide registry of active sessions keyed by opaque token.
//!
//! Expiry is lazy: [`SessionStore::lookup`] returns expired entries as-is and
//! callers decide. Entries leave the map on logout, on supersession by a new
//! login, on account revocation, or through the optional
//! [`SessionStore::purge_expired`] sweep.
//!
//! All operations take the internal lock for the duration of a single map
//! access, so operations on one token are linearizable.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::crypto;

use crate::domain::entity::session::Session;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for `owner_id` and return its fresh token
    pub fn create(&self, owner_id: UserId, expires_at: DateTime<Utc>) -> String {
        let session = Session::new(owner_id, expires_at);
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        loop {
            let token = crypto::random_token();
            if let Entry::Vacant(slot) = sessions.entry(token.clone()) {
                slot.insert(session);
                return token;
            }
        }
    }

    /// Registered session for `token`, expired or not
    pub fn lookup(&self, token: &str) -> Option<Session> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
    }

    /// Remove a session, returning it if it was present
    pub fn delete(&self, token: &str) -> Option<Session> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
    }

    /// Remove every session of one user, returning how many were removed
    pub fn delete_all_for_owner(&self, owner_id: UserId) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| session.owner_id != owner_id);
        before - sessions.len()
    }

    /// Drop every session expired at `now`, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
