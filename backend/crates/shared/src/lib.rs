//! Shared Kernel
//!
//! The small vocabulary every crate in the workspace agrees on:
//! - Error kinds and the HTTP-facing `AppError`
//! - The repository error taxonomy (`RepoError`)
//! - Typed integer IDs
//!
//! Nothing here knows about users, tasks or sessions.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod repo;
}
pub mod id;
