pub mod lookup;
pub mod task;
