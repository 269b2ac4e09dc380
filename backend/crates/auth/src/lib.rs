//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Session store, use cases, configuration
//! - `infra/` - SQLite implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session middleware
//!
//! ## Features
//! - Username + password login with in-memory, cookie-referenced sessions
//! - One active session per browser; a fresh login supersedes the old token
//! - Admin flag and per-account `active` switch
//! - One-time bootstrap of a default administrator
//! - User administration (admins, or users on their own record)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens are 128-bit random values; sessions are never renewed
//! - Unknown user and wrong password are indistinguishable to the client
//! - Sessions live in process memory; a restart signs everyone out

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::config::{AuthConfig, BootstrapConfig};
pub use application::session_store::SessionStore;
pub use domain::entity::current_user::CurrentUser;
pub use domain::repository::{OwnedDataRepository, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteAuthRepository;
pub use presentation::router::auth_router;
pub use presentation::{AuthAppState, require_session};
