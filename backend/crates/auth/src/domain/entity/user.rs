//! User Entity
//!
//! Identity record. The id is assigned by the store and never changes; so does
//! the user name.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub name: String,
    pub surname: String,
    pub admin: bool,
    /// Inactive users cannot log in but stay readable and editable by admins
    pub active: bool,
    pub password_hash: HashedPassword,
}

/// User about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub name: String,
    pub surname: String,
    pub admin: bool,
    pub active: bool,
    pub password_hash: HashedPassword,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            user_name: self.user_name,
            email: self.email,
            name: self.name,
            surname: self.surname,
            admin: self.admin,
            active: self.active,
            password_hash: self.password_hash,
        }
    }
}

/// Partial update of a [`User`]. `None` leaves a field untouched.
///
/// User names are immutable and have no field here.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<Email>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub admin: Option<bool>,
    pub active: Option<bool>,
    pub password_hash: Option<HashedPassword>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.surname.is_none()
            && self.admin.is_none()
            && self.active.is_none()
            && self.password_hash.is_none()
    }
}

impl User {
    /// Apply a patch, returning the updated user
    pub fn apply(self, patch: UserPatch) -> User {
        User {
            id: self.id,
            user_name: self.user_name,
            email: patch.email.unwrap_or(self.email),
            name: patch.name.unwrap_or(self.name),
            surname: patch.surname.unwrap_or(self.surname),
            admin: patch.admin.unwrap_or(self.admin),
            active: patch.active.unwrap_or(self.active),
            password_hash: patch.password_hash.unwrap_or(self.password_hash),
        }
    }
}
