//! Repository Error Taxonomy
//!
//! Closed set of outcomes every repository operation may fail with. The kind is
//! a tag, never parsed from a message; the context carries the operation and the
//! entity involved for diagnostics.
//!
//! Context must never carry a password hash or a session token.

use std::error::Error;
use std::fmt;

use thiserror::Error;

use super::kind::ErrorKind;

pub type RepoResult<T> = Result<T, RepoError>;

/// What went wrong, independent of the storage engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoErrorKind {
    /// A uniqueness constraint was violated
    Duplicate,
    /// A point lookup matched no row
    NotFound,
    /// A scoped update matched no row
    UpdateFailed,
    /// A scoped delete matched no row
    DeleteFailed,
    /// Anything else: connectivity, malformed query, disk failure
    Store,
}

impl RepoErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::NotFound => "not found",
            Self::UpdateFailed => "update failed",
            Self::DeleteFailed => "delete failed",
            Self::Store => "store error",
        }
    }

    /// Zero-row mutations are reported like missing rows so that a caller
    /// cannot probe for records owned by someone else.
    pub const fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Duplicate => ErrorKind::Conflict,
            Self::NotFound | Self::UpdateFailed | Self::DeleteFailed => ErrorKind::NotFound,
            Self::Store => ErrorKind::InternalServerError,
        }
    }
}

impl fmt::Display for RepoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured diagnostics attached to a [`RepoError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: &'static str,
    pub entity: &'static str,
    pub entity_id: Option<i64>,
    pub fields: Vec<(&'static str, String)>,
}

impl ErrorContext {
    pub fn new(operation: &'static str, entity: &'static str) -> Self {
        Self {
            operation,
            entity,
            entity_id: None,
            fields: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn with_field(mut self, name: &'static str, value: impl ToString) -> Self {
        self.fields.push((name, value.to_string()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.entity)?;
        if let Some(id) = self.entity_id {
            write!(f, " id={}", id)?;
        }
        for (name, value) in &self.fields {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

/// Repository error: a kind tag plus context
#[derive(Debug, Error)]
#[error("{kind}: {context}")]
pub struct RepoError {
    kind: RepoErrorKind,
    context: ErrorContext,
    #[source]
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl RepoError {
    pub fn new(kind: RepoErrorKind, context: ErrorContext) -> Self {
        Self {
            kind,
            context,
            source: None,
        }
    }

    pub fn duplicate(context: ErrorContext) -> Self {
        Self::new(RepoErrorKind::Duplicate, context)
    }

    pub fn not_found(context: ErrorContext) -> Self {
        Self::new(RepoErrorKind::NotFound, context)
    }

    pub fn update_failed(context: ErrorContext) -> Self {
        Self::new(RepoErrorKind::UpdateFailed, context)
    }

    pub fn delete_failed(context: ErrorContext) -> Self {
        Self::new(RepoErrorKind::DeleteFailed, context)
    }

    pub fn store<E>(context: ErrorContext, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind: RepoErrorKind::Store,
            context,
            source: Some(Box::new(source)),
        }
    }

    #[inline]
    pub fn kind(&self) -> RepoErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind == RepoErrorKind::NotFound
    }

    #[inline]
    pub fn is_duplicate(&self) -> bool {
        self.kind == RepoErrorKind::Duplicate
    }
}

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl RepoError {
    /// Classify a driver error. Uniqueness is read from the driver's constraint
    /// classification, not from the message text.
    pub fn from_sqlx(err: sqlx::Error, context: ErrorContext) -> Self {
        let kind = match &err {
            sqlx::Error::RowNotFound => RepoErrorKind::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoErrorKind::Duplicate
            }
            _ => RepoErrorKind::Store,
        };

        Self {
            kind,
            context,
            source: Some(Box::new(err)),
        }
    }
}

/// Attach repository context to a raw `sqlx` result
#[cfg(feature = "sqlx")]
pub trait SqlxResultExt<T> {
    fn repo_context(self, context: ErrorContext) -> RepoResult<T>;
}

#[cfg(feature = "sqlx")]
impl<T> SqlxResultExt<T> for Result<T, sqlx::Error> {
    fn repo_context(self, context: ErrorContext) -> RepoResult<T> {
        self.map_err(|e| RepoError::from_sqlx(e, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("update", "task")
            .with_id(42)
            .with_field("owner_id", 7);
        assert_eq!(ctx.to_string(), "update task id=42 owner_id=7");
        assert_eq!(ctx.field("owner_id"), Some("7"));
        assert_eq!(ctx.field("missing"), None);
    }

    #[test]
    fn test_error_display() {
        let err = RepoError::delete_failed(ErrorContext::new("delete", "task").with_id(3));
        assert_eq!(err.to_string(), "delete failed: delete task id=3");
        assert_eq!(err.kind(), RepoErrorKind::DeleteFailed);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_store_error_keeps_source() {
        let err = RepoError::store(
            ErrorContext::new("list", "user"),
            std::io::Error::other("disk failure"),
        );
        assert_eq!(err.kind(), RepoErrorKind::Store);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(RepoErrorKind::Duplicate.error_kind(), ErrorKind::Conflict);
        assert_eq!(RepoErrorKind::NotFound.error_kind(), ErrorKind::NotFound);
        assert_eq!(RepoErrorKind::UpdateFailed.error_kind(), ErrorKind::NotFound);
        assert_eq!(RepoErrorKind::DeleteFailed.error_kind(), ErrorKind::NotFound);
        assert_eq!(
            RepoErrorKind::Store.error_kind(),
            ErrorKind::InternalServerError
        );
    }
}
