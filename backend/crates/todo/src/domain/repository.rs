//! Repository Traits
//!
//! Single-task reads and writes take the caller's id and only match a row
//! owned by that caller.

use kernel::error::repo::RepoResult;
use kernel::id::{Id, TaskId, UserId};

use crate::domain::entity::lookup::{Lookup, LookupTable};
use crate::domain::entity::task::{NewTask, Task};

#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    async fn create(&self, task: &NewTask) -> RepoResult<Task>;

    /// Unscoped; callers compare `owner_id` before handing the task out
    async fn find_by_id(&self, id: TaskId) -> RepoResult<Task>;

    /// Empty when the owner has no tasks
    async fn list_for_owner(&self, owner_id: UserId) -> RepoResult<Vec<Task>>;

    /// Write every mutable column of the row matching both `task.id` and
    /// `owner_id`; `UpdateFailed` when there is none
    async fn update(&self, task: &Task, owner_id: UserId) -> RepoResult<Task>;

    /// `DeleteFailed` when no row matches both `id` and `owner_id`
    async fn delete(&self, id: TaskId, owner_id: UserId) -> RepoResult<()>;

    /// Number of removed rows; zero is fine
    async fn delete_all_for_owner(&self, owner_id: UserId) -> RepoResult<u64>;
}

#[trait_variant::make(LookupRepository: Send)]
pub trait LocalLookupRepository {
    /// Insert the values that are missing and return one row per value, in
    /// input order. Existing rows keep their ids.
    async fn ensure_present<T: LookupTable>(&self, values: &[&str]) -> RepoResult<Vec<Lookup<T>>>;

    async fn list<T: LookupTable>(&self) -> RepoResult<Vec<Lookup<T>>>;

    async fn contains<T: LookupTable>(&self, id: Id<T>) -> RepoResult<bool>;
}
