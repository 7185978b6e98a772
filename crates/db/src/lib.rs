use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::info;

pub mod models;
pub mod repository;

pub use repository::{CommandRepository, SqliteCommandRepository};

#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    /// Open (or create) the database at `database_url` and apply pending migrations.
    pub async fn new(database_url: &str) -> Result<DBService, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(database_url, "database ready");
        Ok(DBService { pool })
    }

    /// In-memory database on a single pinned connection. Every connection to
    /// `:memory:` sees its own database, so the pool must never recycle it.
    pub async fn new_in_memory() -> Result<DBService, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(DBService { pool })
    }

    pub fn repository(&self) -> SqliteCommandRepository {
        SqliteCommandRepository::new(self.pool.clone())
    }
}
