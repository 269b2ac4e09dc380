//! Test fixtures shared by the unit tests of this crate

use std::sync::{Arc, Mutex};

use kernel::error::repo::RepoResult;
use kernel::id::UserId;
use platform::database;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::{
    AuthConfig, CheckSessionUseCase, SessionStore, SignInInput, SignInOutput, SignInUseCase,
};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{OwnedDataRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;
use crate::infra::sqlite::SqliteAuthRepository;

pub(crate) fn hash(password: &str) -> HashedPassword {
    ClearTextPassword::for_verification(password.to_string())
        .hash(None)
        .unwrap()
}

pub(crate) struct TestContext {
    pub repo: Arc<SqliteAuthRepository>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AuthConfig>,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = database::connect_in_memory().await.unwrap();
        database::migrate(&pool).await.unwrap();

        Self {
            repo: Arc::new(SqliteAuthRepository::new(pool)),
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(AuthConfig::development()),
        }
    }

    pub async fn add_user(&self, user_name: &str, password: &str, admin: bool, active: bool) -> User {
        self.insert(user_name, &format!("{user_name}@example.com"), password, admin, active)
            .await
    }

    pub async fn add_user_with_email(&self, user_name: &str, email: &str, password: &str) -> User {
        self.insert(user_name, email, password, false, true).await
    }

    async fn insert(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
        admin: bool,
        active: bool,
    ) -> User {
        self.repo
            .create(&NewUser {
                user_name: UserName::new(user_name).unwrap(),
                email: Email::new(email).unwrap(),
                name: String::new(),
                surname: String::new(),
                admin,
                active,
                password_hash: hash(password),
            })
            .await
            .unwrap()
    }

    pub fn sign_in(&self) -> SignInUseCase<SqliteAuthRepository> {
        SignInUseCase::new(self.repo.clone(), self.sessions.clone(), self.config.clone())
    }

    pub fn check_session(&self) -> CheckSessionUseCase<SqliteAuthRepository> {
        CheckSessionUseCase::new(self.repo.clone(), self.sessions.clone())
    }

    pub async fn try_sign_in(&self, user_name: &str, password: &str) -> AuthResult<SignInOutput> {
        self.sign_in()
            .execute(
                SignInInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                },
                None,
            )
            .await
    }
}

/// Owned-data repository that owns nothing and records who was cleared
#[derive(Default)]
pub(crate) struct NoOwnedData {
    cleared: Mutex<Vec<UserId>>,
}

impl NoOwnedData {
    pub fn cleared(&self) -> Vec<UserId> {
        self.cleared.lock().unwrap().clone()
    }
}

impl OwnedDataRepository for NoOwnedData {
    async fn delete_all_for_owner(&self, owner_id: UserId) -> RepoResult<u64> {
        self.cleared.lock().unwrap().push(owner_id);
        Ok(0)
    }
}
