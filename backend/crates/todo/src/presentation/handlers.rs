//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentUser;
use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{TaskId, markers};

use crate::application::TaskUseCase;
use crate::domain::repository::{LookupRepository, TaskRepository};
use crate::error::TodoResult;
use crate::presentation::dto::{
    ColorResponse, CreateTaskRequest, LabelResponse, TaskResponse, UpdateTaskRequest,
};

pub struct TodoAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for TodoAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> TodoAppState<R>
where
    R: TaskRepository + LookupRepository,
{
    fn tasks(&self) -> TaskUseCase<R> {
        TaskUseCase::new(self.repo.clone())
    }
}

// ============================================================================
// Notes (behind the session middleware)
// ============================================================================

/// GET /api/notes
pub async fn list_tasks<R>(
    State(state): State<TodoAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> TodoResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let tasks = state.tasks().list(current.user_id).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// POST /api/notes
pub async fn create_task<R>(
    State(state): State<TodoAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> TodoResult<impl IntoResponse>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let task = state.tasks().create(current.user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// GET /api/notes/{id}
pub async fn get_task<R>(
    State(state): State<TodoAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> TodoResult<Json<TaskResponse>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let task = state.tasks().get(current.user_id, TaskId::new(id)).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// PUT /api/notes/{id}
pub async fn update_task<R>(
    State(state): State<TodoAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> TodoResult<Json<TaskResponse>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let task = state
        .tasks()
        .update(current.user_id, TaskId::new(id), req.into())
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// DELETE /api/notes/{id}
pub async fn delete_task<R>(
    State(state): State<TodoAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> TodoResult<StatusCode>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    state.tasks().delete(current.user_id, TaskId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Options (public)
// ============================================================================

/// GET /api/options/states
pub async fn list_states<R>(
    State(state): State<TodoAppState<R>>,
) -> TodoResult<Json<Vec<LabelResponse>>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let rows = state.repo.list::<markers::State>().await?;
    Ok(Json(rows.iter().map(LabelResponse::from).collect()))
}

/// GET /api/options/priorities
pub async fn list_priorities<R>(
    State(state): State<TodoAppState<R>>,
) -> TodoResult<Json<Vec<LabelResponse>>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let rows = state.repo.list::<markers::Priority>().await?;
    Ok(Json(rows.iter().map(LabelResponse::from).collect()))
}

/// GET /api/options/colors
pub async fn list_colors<R>(
    State(state): State<TodoAppState<R>>,
) -> TodoResult<Json<Vec<ColorResponse>>>
where
    R: TaskRepository + LookupRepository + Sync + 'static,
{
    let rows = state.repo.list::<markers::Color>().await?;
    Ok(Json(rows.iter().map(ColorResponse::from).collect()))
}
