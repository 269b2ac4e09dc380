//! Task Title Value Object
//!
//! ## Invariants
//! - NFKC normalized and trimmed
//! - 1 to [`TITLE_MAX_LENGTH`] characters
//! - No control characters

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const TITLE_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("Title cannot be empty")]
    Empty,

    #[error("Title is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Title contains invalid control characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TitleError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let normalized = normalized.trim().to_string();

        if normalized.is_empty() {
            return Err(TitleError::Empty);
        }

        let length = normalized.chars().count();
        if length > TITLE_MAX_LENGTH {
            return Err(TitleError::TooLong {
                length,
                max: TITLE_MAX_LENGTH,
            });
        }

        if normalized.chars().any(char::is_control) {
            return Err(TitleError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
