//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::id::UserId;
use platform::cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SessionStore, SignInUseCase, SignOutUseCase, UserAdminUseCase,
};
use crate::domain::entity::current_user::CurrentUser;
use crate::domain::repository::{OwnedDataRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, UpdateUserRequest, UserResponse,
};

/// Shared state for auth handlers and the session middleware
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

/// State for user administration, which also needs the owner of user data
pub struct UsersAppState<R, D> {
    pub auth: AuthAppState<R>,
    pub owned_data: Arc<D>,
}

impl<R, D> Clone for UsersAppState<R, D> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            owned_data: self.owned_data.clone(),
        }
    }
}

impl<R, D> UsersAppState<R, D>
where
    R: UserRepository,
    D: OwnedDataRepository,
{
    fn use_case(&self) -> UserAdminUseCase<R, D> {
        UserAdminUseCase::new(
            self.auth.repo.clone(),
            self.owned_data.clone(),
            self.auth.sessions.clone(),
            self.auth.config.clone(),
        )
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let previous = cookie::extract_cookie(&headers, &state.config.session_cookie_name);
    let output = use_case.execute(req.into(), previous.as_deref()).await?;

    let set_cookie = cookie::set_cookie_header(
        &state.config.cookie_config(),
        &output.session_token,
        Some(output.expires_at),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

/// GET /api/login
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let token = cookie::extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.sessions.clone());
    let user = use_case.current_user(&token).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/login
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + Sync + 'static,
{
    if let Some(token) = cookie::extract_cookie(&headers, &state.config.session_cookie_name) {
        SignOutUseCase::new(state.sessions.clone()).execute(&token);
    }

    let clear = cookie::delete_cookie_header(&state.config.cookie_config());
    (StatusCode::RESET_CONTENT, [(header::SET_COOKIE, clear)])
}

// ============================================================================
// Users (behind the session middleware)
// ============================================================================

/// GET /api/users
pub async fn list_users<R, D>(
    State(state): State<UsersAppState<R, D>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    let users = state.use_case().list(current).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /api/users
pub async fn create_user<R, D>(
    State(state): State<UsersAppState<R, D>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    let user = state.use_case().create(current, req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/users/{id}
pub async fn get_user<R, D>(
    State(state): State<UsersAppState<R, D>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    let user = state.use_case().get(current, UserId::new(id)).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/{id}
pub async fn update_user<R, D>(
    State(state): State<UsersAppState<R, D>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    let user = state
        .use_case()
        .update(current, UserId::new(id), req.into())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R, D>(
    State(state): State<UsersAppState<R, D>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    state.use_case().delete(current, UserId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
