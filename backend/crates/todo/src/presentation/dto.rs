//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{ColorId, PriorityId, StateId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{CreateTaskInput, UpdateTaskInput};
use crate::domain::entity::lookup::{Color, Lookup};
use crate::domain::entity::task::Task;

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationDto {
    #[serde(default)]
    pub does_expire: bool,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state_id: Option<StateId>,
    pub priority_id: Option<PriorityId>,
    pub color_id: Option<ColorId>,
    pub expiration: ExpirationDto,
    pub owner_id: i64,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.get(),
            title: task.title.to_string(),
            description: task.description.clone(),
            state_id: task.state_id,
            priority_id: task.priority_id,
            color_id: task.color_id,
            expiration: ExpirationDto {
                does_expire: task.expiration.does_expire,
                date: task.expiration.does_expire.then_some(task.expiration.date),
            },
            owner_id: task.owner_id.get(),
        }
    }
}

/// Create task request; the owner is always the caller
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state_id: Option<StateId>,
    #[serde(default)]
    pub priority_id: Option<PriorityId>,
    #[serde(default)]
    pub color_id: Option<ColorId>,
    #[serde(default)]
    pub expiration: ExpirationDto,
}

impl From<CreateTaskRequest> for CreateTaskInput {
    fn from(req: CreateTaskRequest) -> Self {
        CreateTaskInput {
            title: req.title,
            description: req.description,
            state_id: req.state_id,
            priority_id: req.priority_id,
            color_id: req.color_id,
            does_expire: req.expiration.does_expire,
            expiration_date: req.expiration.date,
        }
    }
}

/// Update task request. An absent field is left alone, an explicit `null`
/// clears a lookup reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "present")]
    pub state_id: Option<Option<StateId>>,
    #[serde(deserialize_with = "present")]
    pub priority_id: Option<Option<PriorityId>>,
    #[serde(deserialize_with = "present")]
    pub color_id: Option<Option<ColorId>>,
    pub expiration: Option<ExpirationPatchDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpirationPatchDto {
    pub does_expire: Option<bool>,
    pub date: Option<DateTime<Utc>>,
}

/// Distinguishes a field sent as `null` from one that was left out
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateTaskRequest> for UpdateTaskInput {
    fn from(req: UpdateTaskRequest) -> Self {
        let expiration = req.expiration.unwrap_or_default();
        UpdateTaskInput {
            title: req.title,
            description: req.description,
            state_id: req.state_id,
            priority_id: req.priority_id,
            color_id: req.color_id,
            does_expire: expiration.does_expire,
            expiration_date: expiration.date,
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// A state or a priority
#[derive(Debug, Clone, Serialize)]
pub struct LabelResponse {
    pub id: i64,
    pub label: String,
}

impl<T> From<&Lookup<T>> for LabelResponse {
    fn from(row: &Lookup<T>) -> Self {
        Self {
            id: row.id.get(),
            label: row.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorResponse {
    pub id: i64,
    pub hex: String,
}

impl From<&Color> for ColorResponse {
    fn from(row: &Color) -> Self {
        Self {
            id: row.id.get(),
            hex: row.value.clone(),
        }
    }
}
