//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::lookup::{Color, Lookup, LookupTable, Priority, State};
pub use entity::task::{Expiration, NewTask, Task, TaskPatch};
pub use repository::{LookupRepository, TaskRepository};
pub use value_object::title::Title;
