//! Auth Router

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::domain::repository::{OwnedDataRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState, UsersAppState};
use crate::presentation::middleware::require_session;

/// Routes for `/login` and `/users`, to be nested under `/api`
pub fn auth_router<R, D>(state: AuthAppState<R>, owned_data: Arc<D>) -> Router
where
    R: UserRepository + Sync + 'static,
    D: OwnedDataRepository + Sync + 'static,
{
    let users_state = UsersAppState {
        auth: state.clone(),
        owned_data,
    };

    let users = Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R, D>).post(handlers::create_user::<R, D>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R, D>)
                .put(handlers::update_user::<R, D>)
                .delete(handlers::delete_user::<R, D>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<R>,
        ))
        .with_state(users_state);

    Router::new()
        .route(
            "/login",
            get(handlers::current_user::<R>)
                .post(handlers::sign_in::<R>)
                .delete(handlers::sign_out::<R>),
        )
        .with_state(state)
        .merge(users)
}
