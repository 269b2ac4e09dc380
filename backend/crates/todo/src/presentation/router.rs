//! Todo Router

use auth::{AuthAppState, UserRepository, require_session};
use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::domain::repository::{LookupRepository, TaskRepository};
use crate::presentation::handlers::{self, TodoAppState};

/// Routes for `/notes` and `/options`, to be nested under `/api`.
///
/// Notes need a session, checked against `auth`; options are public.
pub fn todo_router<R, U>(state: TodoAppState<R>, auth: AuthAppState<U>) -> Router
where
    R: TaskRepository + LookupRepository + Sync + 'static,
    U: UserRepository + Sync + 'static,
{
    let notes = Router::new()
        .route(
            "/notes",
            get(handlers::list_tasks::<R>).post(handlers::create_task::<R>),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_task::<R>)
                .put(handlers::update_task::<R>)
                .delete(handlers::delete_task::<R>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_session::<U>));

    let options = Router::new()
        .route("/options/states", get(handlers::list_states::<R>))
        .route("/options/priorities", get(handlers::list_priorities::<R>))
        .route("/options/colors", get(handlers::list_colors::<R>));

    notes.merge(options).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::seed::{LookupDefaults, SeedLookupsUseCase};
    use crate::infra::sqlite::SqliteTodoRepository;
    use crate::testing::TestContext;
    use auth::{AuthConfig, SqliteAuthRepository};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ctx: &TestContext) -> Router {
        let auth = AuthAppState::<SqliteAuthRepository> {
            repo: ctx.users.clone(),
            sessions: ctx.sessions.clone(),
            config: Arc::new(AuthConfig::development()),
        };
        todo_router(
            TodoAppState::<SqliteTodoRepository> {
                repo: ctx.repo.clone(),
            },
            auth,
        )
    }

    fn request(method: &str, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_notes_require_session() {
        let ctx = TestContext::new().await;
        let response = app(&ctx)
            .oneshot(Request::get("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_note_lifecycle_and_isolation() {
        let ctx = TestContext::new().await;
        let alice = ctx.add_user("alice").await;
        let bob = ctx.add_user("bob").await;
        let alice_cookie = ctx.session_for(alice);
        let bob_cookie = ctx.session_for(bob);

        let created = app(&ctx)
            .oneshot(request(
                "POST",
                "/notes",
                &alice_cookie,
                Some(json!({ "title": "T", "description": "first" })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = json_body(created).await;
        assert_eq!(created["ownerId"], alice.get());
        let uri = format!("/notes/{}", created["id"]);

        let listed = app(&ctx)
            .oneshot(request("GET", "/notes", &alice_cookie, None))
            .await
            .unwrap();
        assert_eq!(json_body(listed).await.as_array().unwrap().len(), 1);

        let bob_list = app(&ctx)
            .oneshot(request("GET", "/notes", &bob_cookie, None))
            .await
            .unwrap();
        assert!(json_body(bob_list).await.as_array().unwrap().is_empty());

        for (method, body) in [
            ("GET", None),
            ("PUT", Some(json!({ "title": "mine now" }))),
            ("DELETE", None),
        ] {
            let response = app(&ctx)
                .oneshot(request(method, &uri, &bob_cookie, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} by non-owner");
        }

        let updated = app(&ctx)
            .oneshot(request(
                "PUT",
                &uri,
                &alice_cookie,
                Some(json!({ "description": "second" })),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json_body(updated).await;
        assert_eq!(updated["title"], "T");
        assert_eq!(updated["description"], "second");

        let deleted = app(&ctx)
            .oneshot(request("DELETE", &uri, &alice_cookie, None))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let gone = app(&ctx)
            .oneshot(request("GET", &uri, &alice_cookie, None))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_title_is_bad_request() {
        let ctx = TestContext::new().await;
        let alice = ctx.add_user("alice").await;
        let cookie = ctx.session_for(alice);

        let response = app(&ctx)
            .oneshot(request("POST", "/notes", &cookie, Some(json!({ "title": "" }))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options_are_public() {
        let ctx = TestContext::new().await;
        SeedLookupsUseCase::new(ctx.repo.clone())
            .execute(&LookupDefaults::default())
            .await
            .unwrap();

        let states = app(&ctx)
            .oneshot(Request::get("/options/states").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(states.status(), StatusCode::OK);
        let states = json_body(states).await;
        assert_eq!(states[0]["label"], "done");
        assert_eq!(states.as_array().unwrap().len(), 4);

        let colors = app(&ctx)
            .oneshot(Request::get("/options/colors").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(colors).await[1]["hex"], "#ff0000");

        let priorities = app(&ctx)
            .oneshot(Request::get("/options/priorities").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(priorities).await.as_array().unwrap().len(), 6);
    }
}
