//! Storage seam between the command service and SQLite.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::command::{Command, NewCommand};

/// Persistence operations the command service relies on. Each call maps to a
/// single SQL statement, so every operation is atomic at the row level.
#[async_trait]
pub trait CommandRepository: Send + Sync {
    /// All commands, newest first.
    async fn find_all(&self) -> Result<Vec<Command>, sqlx::Error>;

    async fn find(&self, id: i64) -> Result<Option<Command>, sqlx::Error>;

    async fn insert(&self, data: NewCommand) -> Result<Command, sqlx::Error>;

    /// Write back an existing command; `None` if it was removed meanwhile.
    async fn save(&self, command: &Command) -> Result<Option<Command>, sqlx::Error>;

    /// Returns whether a row was removed.
    async fn remove(&self, id: i64) -> Result<bool, sqlx::Error>;
}

#[derive(Clone)]
pub struct SqliteCommandRepository {
    pool: SqlitePool,
}

impl SqliteCommandRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandRepository for SqliteCommandRepository {
    async fn find_all(&self) -> Result<Vec<Command>, sqlx::Error> {
        Command::find_all(&self.pool).await
    }

    async fn find(&self, id: i64) -> Result<Option<Command>, sqlx::Error> {
        Command::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, data: NewCommand) -> Result<Command, sqlx::Error> {
        Command::create(&self.pool, &data).await
    }

    async fn save(&self, command: &Command) -> Result<Option<Command>, sqlx::Error> {
        Command::update(&self.pool, command).await
    }

    async fn remove(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(Command::delete(&self.pool, id).await? > 0)
    }
}
