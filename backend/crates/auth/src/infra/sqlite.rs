//! SQLite Repository Implementations

use kernel::error::repo::{ErrorContext, RepoError, RepoResult, SqlxResultExt};
use kernel::id::UserId;
use platform::database::DbPool;
use platform::password::HashedPassword;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{MarkerRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};

const USER_COLUMNS: &str =
    "id, username, email, name, surname, admin, active, password_hash";

/// SQLite-backed auth repository
#[derive(Clone)]
pub struct SqliteAuthRepository {
    pool: DbPool,
}

impl SqliteAuthRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert_user<'e, E>(executor: E, user: &NewUser) -> RepoResult<User>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let id = sqlx::query(
            r#"
            INSERT INTO users (username, email, name, surname, admin, active, password_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.admin)
        .bind(user.active)
        .bind(user.password_hash.as_phc_string())
        .execute(executor)
        .await
        .repo_context(
            ErrorContext::new("create", "user").with_field("username", user.user_name.as_str()),
        )?
        .last_insert_rowid();

        Ok(user.clone().with_id(UserId::new(id)))
    }

    async fn fetch_user(&self, key: UserKey<'_>) -> RepoResult<User> {
        let context = key.context();
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {} = ?", key.column());
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match key {
            UserKey::Id(id) => query.bind(id.get()),
            UserKey::UserName(user_name) => query.bind(user_name.as_str()),
            UserKey::Email(email) => query.bind(email.as_str()),
        };

        let row = query
            .fetch_one(&self.pool)
            .await
            .repo_context(context.clone())?;

        row.into_user(context)
    }
}

/// The unique columns a single user can be fetched by
#[derive(Clone, Copy)]
enum UserKey<'a> {
    Id(UserId),
    UserName(&'a UserName),
    Email(&'a Email),
}

impl UserKey<'_> {
    fn column(self) -> &'static str {
        match self {
            UserKey::Id(_) => "id",
            UserKey::UserName(_) => "username",
            UserKey::Email(_) => "email",
        }
    }

    fn context(self) -> ErrorContext {
        let context = ErrorContext::new("get", "user");
        match self {
            UserKey::Id(id) => context.with_id(id.get()),
            UserKey::UserName(user_name) => context.with_field("username", user_name.as_str()),
            UserKey::Email(email) => context.with_field("email", email.as_str()),
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for SqliteAuthRepository {
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        Self::insert_user(&self.pool, user).await
    }

    async fn find_by_id(&self, id: UserId) -> RepoResult<User> {
        self.fetch_user(UserKey::Id(id)).await
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> RepoResult<User> {
        self.fetch_user(UserKey::UserName(user_name)).await
    }

    async fn find_by_email(&self, email: &Email) -> RepoResult<User> {
        self.fetch_user(UserKey::Email(email)).await
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        let context = ErrorContext::new("list", "user");
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .repo_context(context.clone())?;

        rows.into_iter()
            .map(|row| row.into_user(context.clone()))
            .collect()
    }

    async fn update(&self, user: &User) -> RepoResult<User> {
        let context = ErrorContext::new("update", "user").with_id(user.id.get());
        let affected = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, name = ?, surname = ?, admin = ?, active = ?, password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.admin)
        .bind(user.active)
        .bind(user.password_hash.as_phc_string())
        .bind(user.id.get())
        .execute(&self.pool)
        .await
        .repo_context(context.clone())?
        .rows_affected();

        if affected == 0 {
            tracing::debug!(user_id = %user.id, "User update matched no row");
            return Err(RepoError::update_failed(context));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let context = ErrorContext::new("delete", "user").with_id(id.get());
        let affected = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .repo_context(context.clone())?
            .rows_affected();

        if affected == 0 {
            tracing::debug!(user_id = %id, "User delete matched no row");
            return Err(RepoError::delete_failed(context));
        }

        Ok(())
    }
}

// ============================================================================
// Marker Repository Implementation
// ============================================================================

impl MarkerRepository for SqliteAuthRepository {
    async fn find_marker(&self, key: &str) -> RepoResult<Vec<u8>> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT value FROM internals WHERE key = ?")
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .repo_context(ErrorContext::new("get", "internal").with_field("key", key))
    }

    async fn create_user_with_marker(
        &self,
        user: &NewUser,
        key: &str,
        value: &[u8],
    ) -> RepoResult<User> {
        let context = ErrorContext::new("create", "internal").with_field("key", key);

        let mut tx = self.pool.begin().await.repo_context(context.clone())?;

        let created = Self::insert_user(&mut *tx, user).await?;

        sqlx::query("INSERT INTO internals (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .repo_context(context.clone())?;

        tx.commit().await.repo_context(context)?;

        Ok(created)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    name: String,
    surname: String,
    admin: bool,
    active: bool,
    password_hash: String,
}

impl UserRow {
    fn into_user(self, context: ErrorContext) -> RepoResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| RepoError::store(context.with_id(self.id), e))?;

        Ok(User {
            id: UserId::new(self.id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            name: self.name,
            surname: self.surname,
            admin: self.admin,
            active: self.active,
            password_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, TestContext};
    use kernel::error::repo::RepoErrorKind;

    fn new_user(user_name: &str, email: &str) -> NewUser {
        NewUser {
            user_name: UserName::new(user_name).unwrap(),
            email: Email::new(email).unwrap(),
            name: "Ada".into(),
            surname: "Lovelace".into(),
            admin: false,
            active: true,
            password_hash: testing::hash("analytical-engine"),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let ctx = TestContext::new().await;
        let created = ctx.repo.create(&new_user("ada", "ada@example.com")).await.unwrap();

        let by_id = ctx.repo.find_by_id(created.id).await.unwrap();
        let by_name = ctx
            .repo
            .find_by_user_name(&UserName::new("ada").unwrap())
            .await
            .unwrap();
        let by_email = ctx
            .repo
            .find_by_email(&Email::new("ada@example.com").unwrap())
            .await
            .unwrap();

        assert_eq!(by_id.id, created.id);
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_id.surname, "Lovelace");
        assert_eq!(by_id.password_hash, created.password_hash);
    }

    #[tokio::test]
    async fn test_point_lookups_report_not_found() {
        let ctx = TestContext::new().await;

        let by_id = ctx.repo.find_by_id(UserId::new(99)).await.unwrap_err();
        let by_name = ctx
            .repo
            .find_by_user_name(&UserName::new("nobody").unwrap())
            .await
            .unwrap_err();
        let by_email = ctx
            .repo
            .find_by_email(&Email::new("nobody@example.com").unwrap())
            .await
            .unwrap_err();

        assert!(by_id.is_not_found());
        assert_eq!(by_id.context().entity_id, Some(99));
        assert!(by_name.is_not_found());
        assert_eq!(by_name.context().to_string(), "get user username=nobody");
        assert!(by_email.is_not_found());
        assert_eq!(
            by_email.context().to_string(),
            "get user email=nobody@example.com"
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_no_row() {
        let ctx = TestContext::new().await;
        ctx.repo.create(&new_user("ada", "a@x.com")).await.unwrap();

        let err = ctx.repo.create(&new_user("grace", "a@x.com")).await.unwrap_err();

        assert_eq!(err.kind(), RepoErrorKind::Duplicate);
        assert_eq!(ctx.repo.list().await.unwrap().len(), 1);
        assert!(
            ctx.repo
                .find_by_user_name(&UserName::new("grace").unwrap())
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_duplicate_user_name() {
        let ctx = TestContext::new().await;
        ctx.repo.create(&new_user("ada", "a@x.com")).await.unwrap();

        let err = ctx.repo.create(&new_user("ada", "b@x.com")).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_list_is_empty_without_users() {
        let ctx = TestContext::new().await;
        assert!(ctx.repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let ctx = TestContext::new().await;
        let mut user = ctx.repo.create(&new_user("ada", "a@x.com")).await.unwrap();

        user.name = "Augusta".into();
        user.active = false;
        ctx.repo.update(&user).await.unwrap();

        let stored = ctx.repo.find_by_id(user.id).await.unwrap();
        assert_eq!(stored.name, "Augusta");
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let ctx = TestContext::new().await;
        let ghost = new_user("ghost", "g@x.com").with_id(UserId::new(42));

        let err = ctx.repo.update(&ghost).await.unwrap_err();
        assert_eq!(err.kind(), RepoErrorKind::UpdateFailed);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_duplicate() {
        let ctx = TestContext::new().await;
        ctx.repo.create(&new_user("ada", "a@x.com")).await.unwrap();
        let mut grace = ctx.repo.create(&new_user("grace", "g@x.com")).await.unwrap();

        grace.email = Email::new("a@x.com").unwrap();
        let err = ctx.repo.update(&grace).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_delete() {
        let ctx = TestContext::new().await;
        let user = ctx.repo.create(&new_user("ada", "a@x.com")).await.unwrap();

        ctx.repo.delete(user.id).await.unwrap();
        assert!(ctx.repo.find_by_id(user.id).await.unwrap_err().is_not_found());

        let err = ctx.repo.delete(user.id).await.unwrap_err();
        assert_eq!(err.kind(), RepoErrorKind::DeleteFailed);
    }

    #[tokio::test]
    async fn test_marker_roundtrip() {
        let ctx = TestContext::new().await;
        assert!(ctx.repo.find_marker("first_user").await.unwrap_err().is_not_found());

        let user = ctx
            .repo
            .create_user_with_marker(&new_user("ada", "a@x.com"), "first_user", b"ada")
            .await
            .unwrap();

        assert_eq!(ctx.repo.find_marker("first_user").await.unwrap(), b"ada");
        assert_eq!(ctx.repo.find_by_id(user.id).await.unwrap().user_name.as_str(), "ada");
    }

    #[tokio::test]
    async fn test_marker_transaction_rolls_back() {
        let ctx = TestContext::new().await;
        ctx.repo
            .create_user_with_marker(&new_user("ada", "a@x.com"), "first_user", b"ada")
            .await
            .unwrap();

        // The user insert succeeds, the marker insert collides
        let err = ctx
            .repo
            .create_user_with_marker(&new_user("grace", "g@x.com"), "first_user", b"grace")
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(ctx.repo.list().await.unwrap().len(), 1);
        assert_eq!(ctx.repo.find_marker("first_user").await.unwrap(), b"ada");
    }
}
