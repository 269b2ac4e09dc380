//! Entities

pub mod current_user;
pub mod session;
pub mod user;
