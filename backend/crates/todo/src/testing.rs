//! Test fixtures shared by the unit tests of this crate

use std::sync::Arc;

use auth::domain::entity::user::NewUser;
use auth::domain::value_object::{email::Email, user_name::UserName};
use auth::{SessionStore, SqliteAuthRepository, UserRepository};
use chrono::{Duration, Utc};
use kernel::id::UserId;
use platform::database;
use platform::password::ClearTextPassword;

use crate::domain::entity::task::{Expiration, NewTask};
use crate::domain::value_object::title::Title;
use crate::infra::sqlite::SqliteTodoRepository;

pub(crate) const PASSWORD: &str = "correct-horse-battery";

pub(crate) fn new_task(title: &str, owner_id: UserId) -> NewTask {
    NewTask {
        title: Title::new(title).unwrap(),
        description: String::new(),
        state_id: None,
        priority_id: None,
        color_id: None,
        expiration: Expiration::never(),
        owner_id,
    }
}

pub(crate) struct TestContext {
    pub repo: Arc<SqliteTodoRepository>,
    pub users: Arc<SqliteAuthRepository>,
    pub sessions: Arc<SessionStore>,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = database::connect_in_memory().await.unwrap();
        database::migrate(&pool).await.unwrap();

        Self {
            repo: Arc::new(SqliteTodoRepository::new(pool.clone())),
            users: Arc::new(SqliteAuthRepository::new(pool)),
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub async fn add_user(&self, user_name: &str) -> UserId {
        self.insert(user_name, &format!("{user_name}@example.com"), false)
            .await
    }

    pub async fn add_admin(&self, user_name: &str, email: &str) -> UserId {
        self.insert(user_name, email, true).await
    }

    async fn insert(&self, user_name: &str, email: &str, admin: bool) -> UserId {
        let password_hash = ClearTextPassword::for_verification(PASSWORD.to_string())
            .hash(None)
            .unwrap();

        self.users
            .create(&NewUser {
                user_name: UserName::new(user_name).unwrap(),
                email: Email::new(email).unwrap(),
                name: String::new(),
                surname: String::new(),
                admin,
                active: true,
                password_hash,
            })
            .await
            .unwrap()
            .id
    }

    /// Session cookie value for `owner_id`, skipping the login round trip
    pub fn session_for(&self, owner_id: UserId) -> String {
        let token = self.sessions.create(owner_id, Utc::now() + Duration::hours(1));
        format!("ST={token}")
    }
}
