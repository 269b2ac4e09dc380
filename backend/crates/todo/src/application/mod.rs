//! Application Layer

pub mod seed;
pub mod tasks;

pub use seed::{LookupDefaults, SeedLookupsUseCase, SeededLookups};
pub use tasks::{CreateTaskInput, TaskUseCase, UpdateTaskInput};
