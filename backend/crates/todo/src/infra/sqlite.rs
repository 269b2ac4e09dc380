//! SQLite Repository Implementations

use auth::OwnedDataRepository;
use chrono::{DateTime, Utc};
use kernel::error::repo::{ErrorContext, RepoError, RepoErrorKind, RepoResult, SqlxResultExt};
use kernel::id::{ColorId, Id, PriorityId, StateId, TaskId, UserId};
use platform::database::DbPool;

use crate::domain::entity::lookup::{Lookup, LookupTable};
use crate::domain::entity::task::{Expiration, NewTask, Task};
use crate::domain::repository::{LookupRepository, TaskRepository};
use crate::domain::value_object::title::Title;

const TASK_COLUMNS: &str = "id, title, description, state_id, priority_id, color_id, \
                            does_expire, expiration_epoch, owner_id";

/// SQLite-backed todo repository
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: DbPool,
}

impl SqliteTodoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn delete_tasks_of(&self, owner_id: UserId) -> RepoResult<u64> {
        let affected = sqlx::query("DELETE FROM tasks WHERE owner_id = ?")
            .bind(owner_id.get())
            .execute(&self.pool)
            .await
            .repo_context(
                ErrorContext::new("delete_all", "task").with_field("owner_id", owner_id),
            )?
            .rows_affected();

        tracing::debug!(owner_id = %owner_id, removed = affected, "Removed tasks of owner");
        Ok(affected)
    }
}

// ============================================================================
// Task Repository Implementation
// ============================================================================

impl TaskRepository for SqliteTodoRepository {
    async fn create(&self, task: &NewTask) -> RepoResult<Task> {
        let id = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, state_id, priority_id, color_id,
                               does_expire, expiration_epoch, owner_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.state_id.map(|id| id.get()))
        .bind(task.priority_id.map(|id| id.get()))
        .bind(task.color_id.map(|id| id.get()))
        .bind(task.expiration.does_expire)
        .bind(task.expiration.date.timestamp())
        .bind(task.owner_id.get())
        .execute(&self.pool)
        .await
        .repo_context(ErrorContext::new("create", "task").with_field("owner_id", task.owner_id))?
        .last_insert_rowid();

        Ok(task.clone().with_id(TaskId::new(id)))
    }

    async fn find_by_id(&self, id: TaskId) -> RepoResult<Task> {
        let context = ErrorContext::new("get", "task").with_id(id.get());
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .repo_context(context.clone())?;

        row.into_task(context)
    }

    async fn list_for_owner(&self, owner_id: UserId) -> RepoResult<Vec<Task>> {
        let context = ErrorContext::new("list", "task").with_field("owner_id", owner_id);
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = ? ORDER BY id"
        ))
        .bind(owner_id.get())
        .fetch_all(&self.pool)
        .await
        .repo_context(context.clone())?;

        rows.into_iter()
            .map(|row| row.into_task(context.clone()))
            .collect()
    }

    async fn update(&self, task: &Task, owner_id: UserId) -> RepoResult<Task> {
        let context = ErrorContext::new("update", "task")
            .with_id(task.id.get())
            .with_field("owner_id", owner_id);

        let affected = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, state_id = ?, priority_id = ?, color_id = ?,
                does_expire = ?, expiration_epoch = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.state_id.map(|id| id.get()))
        .bind(task.priority_id.map(|id| id.get()))
        .bind(task.color_id.map(|id| id.get()))
        .bind(task.expiration.does_expire)
        .bind(task.expiration.date.timestamp())
        .bind(task.id.get())
        .bind(owner_id.get())
        .execute(&self.pool)
        .await
        .repo_context(context.clone())?
        .rows_affected();

        if affected == 0 {
            tracing::debug!(task_id = %task.id, owner_id = %owner_id, "Task update matched no row");
            return Err(RepoError::update_failed(context));
        }

        Ok(Task {
            owner_id,
            ..task.clone()
        })
    }

    async fn delete(&self, id: TaskId, owner_id: UserId) -> RepoResult<()> {
        let context = ErrorContext::new("delete", "task")
            .with_id(id.get())
            .with_field("owner_id", owner_id);

        let affected = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(id.get())
            .bind(owner_id.get())
            .execute(&self.pool)
            .await
            .repo_context(context.clone())?
            .rows_affected();

        if affected == 0 {
            tracing::debug!(task_id = %id, owner_id = %owner_id, "Task delete matched no row");
            return Err(RepoError::delete_failed(context));
        }

        Ok(())
    }

    async fn delete_all_for_owner(&self, owner_id: UserId) -> RepoResult<u64> {
        self.delete_tasks_of(owner_id).await
    }
}

impl OwnedDataRepository for SqliteTodoRepository {
    async fn delete_all_for_owner(&self, owner_id: UserId) -> RepoResult<u64> {
        self.delete_tasks_of(owner_id).await
    }
}

// ============================================================================
// Lookup Repository Implementation
// ============================================================================

impl LookupRepository for SqliteTodoRepository {
    async fn ensure_present<T: LookupTable>(&self, values: &[&str]) -> RepoResult<Vec<Lookup<T>>> {
        let select = format!("SELECT id FROM {} WHERE {} = ?", T::TABLE, T::COLUMN);
        let insert = format!("INSERT INTO {} ({}) VALUES (?)", T::TABLE, T::COLUMN);

        let mut rows = Vec::with_capacity(values.len());
        for &value in values {
            let context = ErrorContext::new("ensure", T::ENTITY).with_field("value", value);

            let existing = sqlx::query_scalar::<_, i64>(&select)
                .bind(value)
                .fetch_optional(&self.pool)
                .await
                .repo_context(context.clone())?;

            let id = match existing {
                Some(id) => id,
                None => {
                    let id = sqlx::query(&insert)
                        .bind(value)
                        .execute(&self.pool)
                        .await
                        .repo_context(context)?
                        .last_insert_rowid();
                    tracing::debug!(table = T::TABLE, value, id, "Seeded lookup row");
                    id
                }
            };

            rows.push(Lookup {
                id: Id::new(id),
                value: value.to_string(),
            });
        }

        Ok(rows)
    }

    async fn list<T: LookupTable>(&self) -> RepoResult<Vec<Lookup<T>>> {
        let rows = sqlx::query_as::<_, (i64, String)>(&format!(
            "SELECT id, {} FROM {} ORDER BY id",
            T::COLUMN,
            T::TABLE
        ))
        .fetch_all(&self.pool)
        .await
        .repo_context(ErrorContext::new("list", T::ENTITY))?;

        Ok(rows
            .into_iter()
            .map(|(id, value)| Lookup {
                id: Id::new(id),
                value,
            })
            .collect())
    }

    async fn contains<T: LookupTable>(&self, id: Id<T>) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT id FROM {} WHERE id = ?",
            T::TABLE
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .repo_context(ErrorContext::new("get", T::ENTITY).with_id(id.get()))?;

        Ok(found.is_some())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    state_id: Option<i64>,
    priority_id: Option<i64>,
    color_id: Option<i64>,
    does_expire: bool,
    expiration_epoch: i64,
    owner_id: i64,
}

impl TaskRow {
    fn into_task(self, context: ErrorContext) -> RepoResult<Task> {
        let date: DateTime<Utc> = DateTime::from_timestamp(self.expiration_epoch, 0)
            .ok_or_else(|| RepoError::new(RepoErrorKind::Store, context.with_id(self.id)))?;

        Ok(Task {
            id: TaskId::new(self.id),
            title: Title::from_db(self.title),
            description: self.description,
            state_id: self.state_id.map(StateId::new),
            priority_id: self.priority_id.map(PriorityId::new),
            color_id: self.color_id.map(ColorId::new),
            expiration: Expiration {
                does_expire: self.does_expire,
                date,
            },
            owner_id: UserId::new(self.owner_id),
        })
    }
}
