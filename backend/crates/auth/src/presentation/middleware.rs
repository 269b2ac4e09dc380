//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid session.
///
/// On success the [`CurrentUser`](crate::CurrentUser) is inserted into the
/// request extensions; otherwise the request is answered with 401.
pub async fn require_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    let current = CheckSessionUseCase::new(state.repo.clone(), state.sessions.clone())
        .authenticate(&token)
        .await?;

    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}
