//! Error conversions
//!
//! Bridges [`RepoError`] into [`AppError`] and [`AppError`] into HTTP responses.

use super::app_error::AppError;
use super::repo::{RepoError, RepoErrorKind};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        let kind = err.kind().error_kind();
        let app = match err.kind() {
            RepoErrorKind::Duplicate => AppError::new(kind, "Record already exists")
                .with_action("Choose a different username or email"),
            RepoErrorKind::NotFound | RepoErrorKind::UpdateFailed | RepoErrorKind::DeleteFailed => {
                AppError::new(kind, "Record not found")
            }
            RepoErrorKind::Store => AppError::new(kind, "Storage error"),
        };
        app.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
