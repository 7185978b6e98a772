//! Service for managing saved shell commands.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use db::{
    CommandRepository,
    models::command::{CommandSummary, NewCommand},
};
use thiserror::Error;
use tracing::{debug, info};
pub use utils::command::{CommandUpdate, REQUIRED_FIELDS_MESSAGE};

#[derive(Debug, Error)]
pub enum CommandServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
}

/// Single entry point for reading and mutating commands
#[derive(Clone)]
pub struct CommandService {
    repository: Arc<dyn CommandRepository>,
}

impl CommandService {
    pub fn new(repository: Arc<dyn CommandRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> Result<Vec<CommandSummary>, CommandServiceError> {
        let commands = self.repository.find_all().await?;
        Ok(commands.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        description: &str,
        command: &str,
    ) -> Result<CommandSummary, CommandServiceError> {
        if is_blank(description) || is_blank(command) {
            return Err(CommandServiceError::Validation(
                REQUIRED_FIELDS_MESSAGE.to_string(),
            ));
        }

        let created = self
            .repository
            .insert(NewCommand {
                description: description.to_string(),
                command: command.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        info!(command_id = created.id, "Created command");
        Ok(created.into())
    }

    /// Apply `changes` to the command `id`. Returns `None` when it does not exist.
    ///
    /// Blank values are ignored rather than stored, so a command can never be
    /// emptied through an update.
    pub async fn update(
        &self,
        id: i64,
        changes: CommandUpdate,
    ) -> Result<Option<CommandSummary>, CommandServiceError> {
        let Some(mut command) = self.repository.find(id).await? else {
            debug!(command_id = id, "Update skipped: command not found");
            return Ok(None);
        };

        if let Some(description) = changes.description.filter(|d| !is_blank(d)) {
            command.description = description;
        }
        if let Some(text) = changes.command.filter(|c| !is_blank(c)) {
            command.command = text;
        }
        command.updated_at = next_updated_at(command.updated_at);

        let saved = self.repository.save(&command).await?;
        if saved.is_some() {
            info!(command_id = id, "Updated command");
        }
        Ok(saved.map(Into::into))
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<bool, CommandServiceError> {
        let removed = self.repository.remove(id).await?;
        if removed {
            info!(command_id = id, "Deleted command");
        } else {
            debug!(command_id = id, "Delete skipped: command not found");
        }
        Ok(removed)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `updated_at` must move forward on every write, even when two writes land
/// within the clock's resolution.
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use db::{DBService, SqliteCommandRepository, models::command::Command};

    use super::*;

    async fn setup() -> (DBService, CommandService) {
        let db = DBService::new_in_memory().await.unwrap();
        let service = CommandService::new(Arc::new(SqliteCommandRepository::new(db.pool.clone())));
        (db, service)
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_entry_with_fresh_id() {
        let (_db, service) = setup().await;
        let first = service.create("List files", "ls -la").await.unwrap();

        let before = service.find_all().await.unwrap();
        let created = service.create("Disk usage", "du -sh").await.unwrap();
        let after = service.find_all().await.unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_ne!(created.id, first.id);
        assert_eq!(
            after.iter().filter(|c| c.id == created.id).count(),
            1,
            "new id must appear once"
        );
        assert_eq!(after[0], created);
    }

    #[tokio::test]
    async fn test_create_allows_duplicates() {
        let (_db, service) = setup().await;
        let a = service.create("same", "echo same").await.unwrap();
        let b = service.create("same", "echo same").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(service.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let (_db, service) = setup().await;

        for (description, command) in [("", "ls"), ("List", ""), ("   ", "ls"), ("List", "\t")] {
            let err = service.create(description, command).await.unwrap_err();
            assert!(matches!(err, CommandServiceError::Validation(ref m) if m == REQUIRED_FIELDS_MESSAGE));
        }
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_description_only() {
        let (db, service) = setup().await;
        let created = service.create("List files", "ls -la").await.unwrap();
        let before = Command::find_by_id(&db.pool, created.id).await.unwrap().unwrap();

        let updated = service
            .update(created.id, CommandUpdate::description("List all files"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "List all files");
        assert_eq!(updated.command, "ls -la");

        let after = Command::find_by_id(&db.pool, created.id).await.unwrap().unwrap();
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_updated_at_strictly_increases_on_rapid_updates() {
        let (db, service) = setup().await;
        let created = service.create("a", "a").await.unwrap();

        let mut last = Command::find_by_id(&db.pool, created.id).await.unwrap().unwrap().updated_at;
        for i in 0..5 {
            service
                .update(created.id, CommandUpdate::command(format!("echo {i}")))
                .await
                .unwrap();
            let current = Command::find_by_id(&db.pool, created.id).await.unwrap().unwrap().updated_at;
            assert!(current > last);
            last = current;
        }
    }

    #[tokio::test]
    async fn test_update_ignores_blank_values() {
        let (_db, service) = setup().await;
        let created = service.create("List files", "ls -la").await.unwrap();

        let updated = service
            .update(
                created.id,
                CommandUpdate {
                    description: Some(String::new()),
                    command: Some("  ".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let (_db, service) = setup().await;
        service.create("List files", "ls -la").await.unwrap();
        let before = service.find_all().await.unwrap();

        let result = service
            .update(9999, CommandUpdate::description("nope"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(service.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let (_db, service) = setup().await;
        let keep = service.create("keep", "true").await.unwrap();
        let gone = service.create("gone", "false").await.unwrap();

        assert!(service.delete(gone.id).await.unwrap());
        assert!(!service.delete(gone.id).await.unwrap());
        assert_eq!(service.find_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_find_all_on_empty_store() {
        let (_db, service) = setup().await;
        assert!(service.find_all().await.unwrap().is_empty());
    }
}
