//! User Name Value Object
//!
//! The login handle. Unique across users and immutable once the account exists.
//!
//! ## Invariants
//! - NFKC normalized and trimmed
//! - 1 to [`USER_NAME_MAX_LENGTH`] characters
//! - No whitespace or control characters
//!
//! Case is preserved and significant: `Admin` and `admin` are different handles.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::error::AuthError;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("User name cannot contain whitespace")]
    ContainsWhitespace,

    #[error("User name contains invalid control characters")]
    InvalidCharacter,
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let normalized = normalized.trim().to_string();

        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        if normalized.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({})", self.0)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
