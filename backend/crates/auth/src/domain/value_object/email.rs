//! Contact address of a user, unique across accounts.
//!
//! Stored trimmed and lowercased so that the UNIQUE index compares
//! addresses the way people read them.

use std::fmt;

use crate::error::{AuthError, AuthResult};

const MAX_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let email = raw.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::validation("Email is required"));
        }
        if email.len() > MAX_LENGTH {
            return Err(AuthError::validation(format!(
                "Email must be at most {MAX_LENGTH} characters"
            )));
        }

        let Some((local, host)) = email.split_once('@') else {
            return Err(AuthError::validation("Email must contain '@'"));
        };
        if local.is_empty() || local.len() > MAX_LOCAL_LENGTH || !valid_host(host) {
            return Err(AuthError::validation(format!("Invalid email: {email}")));
        }

        Ok(Self(email))
    }

    /// Rows were validated on the way in.
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Dot-separated labels of letters, digits and inner hyphens. A single
/// label (`localhost`) is allowed for the bootstrap account.
fn valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
