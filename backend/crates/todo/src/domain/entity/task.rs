//! Task Entity

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::{ColorId, PriorityId, StateId, TaskId, UserId};

use crate::domain::value_object::title::Title;

/// When a task expires.
///
/// Built through [`Expiration::never`] or [`Expiration::at`]: a task that
/// does not expire carries the epoch, and dates are whole seconds, the
/// precision of `tasks.expiration_epoch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiration {
    pub does_expire: bool,
    pub date: DateTime<Utc>,
}

impl Expiration {
    pub fn never() -> Self {
        Self {
            does_expire: false,
            date: DateTime::<Utc>::default(),
        }
    }

    pub fn at(date: DateTime<Utc>) -> Self {
        Self {
            does_expire: true,
            date: date.trunc_subsecs(0),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.does_expire && now >= self.date
    }
}

impl Default for Expiration {
    fn default() -> Self {
        Self::never()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: Title,
    pub description: String,
    pub state_id: Option<StateId>,
    pub priority_id: Option<PriorityId>,
    pub color_id: Option<ColorId>,
    pub expiration: Expiration,
    pub owner_id: UserId,
}

/// A task before the store has assigned its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: Title,
    pub description: String,
    pub state_id: Option<StateId>,
    pub priority_id: Option<PriorityId>,
    pub color_id: Option<ColorId>,
    pub expiration: Expiration,
    pub owner_id: UserId,
}

impl NewTask {
    pub fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            state_id: self.state_id,
            priority_id: self.priority_id,
            color_id: self.color_id,
            expiration: self.expiration,
            owner_id: self.owner_id,
        }
    }
}

/// Changes to a task. `None` leaves a field as it is; for the lookup
/// references `Some(None)` clears the reference.
///
/// The id and the owner are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub state_id: Option<Option<StateId>>,
    pub priority_id: Option<Option<PriorityId>>,
    pub color_id: Option<Option<ColorId>>,
    pub does_expire: Option<bool>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Task {
    pub fn apply(self, patch: TaskPatch) -> Task {
        Task {
            id: self.id,
            title: patch.title.unwrap_or(self.title),
            description: patch.description.unwrap_or(self.description),
            state_id: patch.state_id.unwrap_or(self.state_id),
            priority_id: patch.priority_id.unwrap_or(self.priority_id),
            color_id: patch.color_id.unwrap_or(self.color_id),
            expiration: if patch.does_expire.unwrap_or(self.expiration.does_expire) {
                Expiration::at(patch.expiration_date.unwrap_or(self.expiration.date))
            } else {
                Expiration::never()
            },
            owner_id: self.owner_id,
        }
    }
}
