//! SQLite Connection Pool
//!
//! The store is an embedded, single-writer engine: the pool holds exactly one
//! connection and every statement is serialized through it.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub type DbPool = Pool<Sqlite>;

/// Schema, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations");

/// Open (creating if missing) the database file at `path`
pub async fn connect(path: impl AsRef<Path>) -> Result<DbPool, sqlx::Error> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::info!(path = %path.display(), "Connected to database");
    Ok(pool)
}

/// Private in-memory database
///
/// The single connection is never recycled, otherwise its data would vanish.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply every pending migration
pub async fn migrate(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations completed");
    Ok(())
}
