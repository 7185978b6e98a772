use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;

pub use utils::command::CommandSummary;

const COMMAND_COLUMNS: &str = "id, description, command, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Command {
    #[ts(type = "number")]
    pub id: i64,
    pub description: String,
    pub command: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Command> for CommandSummary {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            description: command.description,
            command: command.command,
        }
    }
}

/// Row to insert; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewCommand {
    pub description: String,
    pub command: String,
    pub created_at: DateTime<Utc>,
}

impl Command {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Command>(&format!(
            "SELECT {COMMAND_COLUMNS} FROM commands ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Command>(&format!(
            "SELECT {COMMAND_COLUMNS} FROM commands WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &NewCommand) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Command>(&format!(
            r#"INSERT INTO commands (description, command, created_at, updated_at)
               VALUES ($1, $2, $3, $3)
               RETURNING {COMMAND_COLUMNS}"#
        ))
        .bind(&data.description)
        .bind(&data.command)
        .bind(data.created_at)
        .fetch_one(pool)
        .await
    }

    /// Persist the mutable columns of an existing row. Returns `None` if the
    /// row no longer exists.
    pub async fn update(pool: &SqlitePool, command: &Command) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Command>(&format!(
            r#"UPDATE commands
               SET description = $2, command = $3, updated_at = $4
               WHERE id = $1
               RETURNING {COMMAND_COLUMNS}"#
        ))
        .bind(command.id)
        .bind(&command.description)
        .bind(&command.command)
        .bind(command.updated_at)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM commands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
