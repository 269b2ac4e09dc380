//! HTTP-facing error classes

use serde::Serialize;

/// The class of a failure as the client sees it.
///
/// Each variant owns exactly one status code; handlers never choose codes
/// themselves.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    /// No usable session, or rejected credentials
    Unauthorized,
    Forbidden,
    /// Absent, or owned by another user
    NotFound,
    /// Username or email already taken
    Conflict,
    InternalServerError,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
        }
    }

    /// Reason phrase, used as the problem `title`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalServerError => "Internal Server Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_kind_has_its_own_status() {
        let kinds = [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::InternalServerError,
        ];
        let codes: Vec<u16> = kinds.iter().map(ErrorKind::status_code).collect();

        assert_eq!(codes, [400, 401, 403, 404, 409, 500]);
    }

    #[test]
    fn test_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InternalServerError).unwrap();
        assert_eq!(json, "\"INTERNAL_SERVER_ERROR\"");
    }
}
