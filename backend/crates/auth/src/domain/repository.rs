//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Point lookups fail with `NotFound`; they never return `Option`.

use kernel::error::repo::RepoResult;
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{email::Email, user_name::UserName};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; `Duplicate` when the user name or email is taken
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    async fn find_by_id(&self, id: UserId) -> RepoResult<User>;

    async fn find_by_user_name(&self, user_name: &UserName) -> RepoResult<User>;

    async fn find_by_email(&self, email: &Email) -> RepoResult<User>;

    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Overwrite every mutable column; `UpdateFailed` when no row matched
    async fn update(&self, user: &User) -> RepoResult<User>;

    /// `DeleteFailed` when no row matched
    async fn delete(&self, id: UserId) -> RepoResult<()>;
}

/// Internal key/value markers
#[trait_variant::make(MarkerRepository: Send)]
pub trait LocalMarkerRepository {
    async fn find_marker(&self, key: &str) -> RepoResult<Vec<u8>>;

    /// Insert the user and the marker atomically: either both exist afterwards or neither
    async fn create_user_with_marker(
        &self,
        user: &NewUser,
        key: &str,
        value: &[u8],
    ) -> RepoResult<User>;
}

/// Data owned by a user that has to go before the user row can
#[trait_variant::make(OwnedDataRepository: Send)]
pub trait LocalOwnedDataRepository {
    /// Remove everything the owner has; owning nothing is not an error
    async fn delete_all_for_owner(&self, owner_id: UserId) -> RepoResult<u64>;
}
