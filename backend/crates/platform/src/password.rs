//! Credential verifier
//!
//! Account passwords are stored as Argon2id PHC strings. An optional
//! application-wide pepper is appended to the clear text before hashing.
//! Clear text is zeroized when dropped and never printed.

use std::fmt;
use std::sync::OnceLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto;

/// Shortest password an administrator may assign
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted password, counted in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of the password generated for the bootstrap administrator
pub const GENERATED_PASSWORD_LENGTH: usize = 24;

/// Reasons a new password is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be blank")]
    Blank,

    #[error("Password contains control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is not a PHC string")]
    InvalidHashFormat,
}

/// A password as typed, NFKC-normalized.
///
/// Not `Clone`; the buffer is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a password chosen for an account.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Wrap login input. No policy applies: accounts created under an
    /// older policy must still be able to sign in.
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    pub fn generate() -> Self {
        Self(crypto::random_alphanumeric(GENERATED_PASSWORD_LENGTH))
    }

    /// Only used to hand a generated password to the operator once.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            phc: hash.to_string(),
        })
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let actual = self.0.chars().count();
        if actual < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual,
            });
        }
        if actual > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual,
            });
        }

        if self.0.chars().any(|c| c.is_control()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Stored credential, the value of `users.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    /// Parse a hash read back from the store.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Match-or-not. A hash that no longer parses never matches.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }

    /// Spend the time of one failed verification when there is no account
    /// to verify against, so unknown and known user names answer alike.
    pub fn verify_nothing(password: &ClearTextPassword, pepper: Option<&[u8]>) {
        static DUMMY: OnceLock<Option<HashedPassword>> = OnceLock::new();

        let dummy = DUMMY.get_or_init(|| ClearTextPassword::generate().hash(None).ok());
        if let Some(hash) = dummy {
            let _ = hash.verify(password, pepper);
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}
