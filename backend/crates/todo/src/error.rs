//! Todo Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use kernel::error::repo::{RepoError, RepoErrorKind};
use thiserror::Error;

use crate::domain::value_object::title::TitleError;

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
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

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::BadRequest,
            TodoError::Repository(e) => e.kind().error_kind(),
            TodoError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            TodoError::Repository(e) if e.kind() == RepoErrorKind::Store => {
                tracing::error!(error = %e, "Todo storage error");
            }
            TodoError::Internal(msg) => {
                tracing::error!(message = %msg, "Todo internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Todo error");
            }
        }
    }
}

impl From<TitleError> for TodoError {
    fn from(err: TitleError) -> Self {
        TodoError::Validation(err.to_string())
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Repository(e) => e.into(),
            TodoError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
