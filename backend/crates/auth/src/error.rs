//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use kernel::error::repo::{RepoError, RepoErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session, unknown token, or expired session
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated, but not allowed to do this
    #[error("Insufficient permissions")]
    Forbidden,

    /// Account is disabled
    #[error("Account is disabled")]
    AccountDisabled,

    /// Password policy error
    #[error("Password validation failed: {0}")]
    PasswordValidation(#[from] PasswordPolicyError),

    /// Malformed input
    #[error("{0}")]
    Validation(String),

    /// Repository error
    #[error(transparent)]
    Repository(#[from] RepoError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden | AuthError::AccountDisabled => ErrorKind::Forbidden,
            AuthError::PasswordValidation(_) | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Repository(e) => e.kind().error_kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// What the client can do about it, when there is something
    fn action(&self) -> Option<&'static str> {
        match self {
            AuthError::Unauthenticated => Some("Sign in at /api/login"),
            AuthError::AccountDisabled => Some("Ask an administrator to reactivate the account"),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Repository(e) if e.kind() == RepoErrorKind::Store => {
                tracing::error!(error = %e, "Auth storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountDisabled => {
                tracing::warn!("Login attempt on disabled account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Repository(e) => e.into(),
            // Never echo internal details to the client
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => {
                let app = AppError::new(other.kind(), other.to_string());
                match other.action() {
                    Some(action) => app.with_action(action),
                    None => app,
                }
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::repo::ErrorContext;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::AccountDisabled.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_status_follows_kind() {
        let dup = AuthError::from(RepoError::duplicate(ErrorContext::new("create", "user")));
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);

        let gone = AuthError::from(RepoError::delete_failed(ErrorContext::new("delete", "user")));
        assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let app: AppError = AuthError::Internal("session owner 7 missing".into()).into();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_unauthenticated_points_to_login() {
        let app: AppError = AuthError::Unauthenticated.into();
        assert_eq!(app.action(), Some("Sign in at /api/login"));

        let app: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(app.action(), None);
    }
}
