//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod check_session;
pub mod config;
pub mod session_store;
pub mod sign_in;
pub mod sign_out;
pub mod users;

// Re-exports
pub use bootstrap::{BootstrapOutcome, BootstrapUseCase, FIRST_USER_MARKER};
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, BootstrapConfig};
pub use session_store::SessionStore;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use users::{CreateUserInput, UpdateUserInput, UserAdminUseCase};
