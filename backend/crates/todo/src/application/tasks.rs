//! Task Use Cases
//!
//! The caller's user id comes from the session, never from the request body.
//! A task owned by someone else is answered exactly like a missing one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::error::repo::{ErrorContext, RepoError};
use kernel::id::{ColorId, Id, PriorityId, StateId, TaskId, UserId};

use crate::domain::entity::lookup::LookupTable;
use crate::domain::entity::task::{Expiration, NewTask, Task, TaskPatch};
use crate::domain::repository::{LookupRepository, TaskRepository};
use crate::domain::value_object::title::Title;
use crate::error::{TodoError, TodoResult};

pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub state_id: Option<StateId>,
    pub priority_id: Option<PriorityId>,
    pub color_id: Option<ColorId>,
    pub does_expire: bool,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// `None` leaves a field untouched; `Some(None)` clears a lookup reference
#[derive(Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state_id: Option<Option<StateId>>,
    pub priority_id: Option<Option<PriorityId>>,
    pub color_id: Option<Option<ColorId>>,
    pub does_expire: Option<bool>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl UpdateTaskInput {
    fn into_patch(self) -> TodoResult<TaskPatch> {
        Ok(TaskPatch {
            title: self.title.map(Title::new).transpose()?,
            description: self.description,
            state_id: self.state_id,
            priority_id: self.priority_id,
            color_id: self.color_id,
            does_expire: self.does_expire,
            expiration_date: self.expiration_date,
        })
    }
}

pub struct TaskUseCase<R>
where
    R: TaskRepository + LookupRepository,
{
    repo: Arc<R>,
}

impl<R> TaskUseCase<R>
where
    R: TaskRepository + LookupRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: UserId) -> TodoResult<Vec<Task>> {
        Ok(self.repo.list_for_owner(owner_id).await?)
    }

    pub async fn create(&self, owner_id: UserId, input: CreateTaskInput) -> TodoResult<Task> {
        let expiration = match (input.does_expire, input.expiration_date) {
            (true, Some(date)) => Expiration::at(date),
            (true, None) => {
                return Err(TodoError::validation(
                    "An expiring task needs an expiration date",
                ));
            }
            (false, _) => Expiration::never(),
        };

        let task = NewTask {
            title: Title::new(&input.title)?,
            description: input.description,
            state_id: input.state_id,
            priority_id: input.priority_id,
            color_id: input.color_id,
            expiration,
            owner_id,
        };
        self.check_references(task.state_id, task.priority_id, task.color_id)
            .await?;

        let created = self.repo.create(&task).await?;
        tracing::info!(task_id = %created.id, owner_id = %owner_id, "Task created");
        Ok(created)
    }

    pub async fn get(&self, owner_id: UserId, id: TaskId) -> TodoResult<Task> {
        let task = self.repo.find_by_id(id).await?;

        if task.owner_id != owner_id {
            tracing::debug!(task_id = %id, owner_id = %owner_id, "Task read by non-owner");
            return Err(RepoError::not_found(
                ErrorContext::new("get", "task")
                    .with_id(id.get())
                    .with_field("owner_id", owner_id),
            )
            .into());
        }

        Ok(task)
    }

    pub async fn update(
        &self,
        owner_id: UserId,
        id: TaskId,
        input: UpdateTaskInput,
    ) -> TodoResult<Task> {
        let patch = input.into_patch()?;

        let current = self.get(owner_id, id).await.map_err(|e| match e {
            TodoError::Repository(e) if e.is_not_found() => {
                TodoError::from(RepoError::update_failed(e.context().clone()))
            }
            other => other,
        })?;

        let starts_expiring = patch.does_expire == Some(true) && !current.expiration.does_expire;
        if starts_expiring && patch.expiration_date.is_none() {
            return Err(TodoError::validation(
                "An expiring task needs an expiration date",
            ));
        }

        let updated = current.apply(patch);
        self.check_references(updated.state_id, updated.priority_id, updated.color_id)
            .await?;

        let saved = self.repo.update(&updated, owner_id).await?;
        tracing::info!(task_id = %id, owner_id = %owner_id, "Task updated");
        Ok(saved)
    }

    pub async fn delete(&self, owner_id: UserId, id: TaskId) -> TodoResult<()> {
        self.repo.delete(id, owner_id).await?;
        tracing::info!(task_id = %id, owner_id = %owner_id, "Task deleted");
        Ok(())
    }

    async fn check_references(
        &self,
        state_id: Option<StateId>,
        priority_id: Option<PriorityId>,
        color_id: Option<ColorId>,
    ) -> TodoResult<()> {
        self.check_reference(state_id).await?;
        self.check_reference(priority_id).await?;
        self.check_reference(color_id).await
    }

    async fn check_reference<T: LookupTable>(&self, id: Option<Id<T>>) -> TodoResult<()> {
        match id {
            Some(id) if !self.repo.contains(id).await? => Err(TodoError::validation(format!(
                "Unknown {} {}",
                T::ENTITY,
                id
            ))),
            _ => Ok(()),
        }
    }
}
