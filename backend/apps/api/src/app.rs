//! Router Composition

use std::sync::Arc;

use auth::{AuthAppState, SqliteAuthRepository, auth_router};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use todo::{SqliteTodoRepository, TodoAppState, todo_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Everything mounted under `/api`
pub fn router(auth: AuthAppState<SqliteAuthRepository>, todo: Arc<SqliteTodoRepository>) -> Router {
    let api = Router::new()
        .route("/", get(banner))
        .merge(auth_router(auth.clone(), todo.clone()))
        .merge(todo_router(TodoAppState { repo: todo }, auth));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

/// CORS for a separately served frontend; `None` when no origin is configured
pub fn cors(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
            .allow_credentials(true),
    )
}

async fn banner() -> &'static str {
    "doit API"
}
