//! Todo (Tasks / Notes) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Task and lookup entities, title value object, repository traits
//! - `application/` - Owner-scoped task use cases, lookup seeding
//! - `infra/` - SQLite implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every task belongs to exactly one user. Reads and writes of a single task
//! are conditioned on the caller being its owner; a task owned by someone else
//! is reported exactly like a task that does not exist.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::seed::{LookupDefaults, SeedLookupsUseCase};
pub use error::{TodoError, TodoResult};
pub use infra::sqlite::SqliteTodoRepository;
pub use presentation::router::todo_router;
pub use presentation::TodoAppState;
