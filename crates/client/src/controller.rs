//! Glue between the API, the local cache and user notifications.
//!
//! Every operation reports failure through a toast and a `false` return;
//! errors never escape the controller.

use async_trait::async_trait;
use thiserror::Error;
use tracing::error;
use utils::command::{CommandSummary, CommandUpdate, REQUIRED_FIELDS_MESSAGE};

use crate::{
    api::{ApiClient, TransportError},
    cache::CommandCache,
    notification::Notifications,
};

pub const LOAD_ERROR_MESSAGE: &str = "Erreur lors du chargement des commandes";
pub const CREATED_TOAST: &str = "Commande ajoutée !";
pub const UPDATED_TOAST: &str = "Commande mise à jour !";
pub const DELETED_TOAST: &str = "Commande supprimée !";
pub const COPIED_TOAST: &str = "Copié !";
pub const COPY_ERROR_TOAST: &str = "Erreur lors de la copie";

/// Remote operations the controller needs.
#[async_trait]
pub trait CommandApi: Send + Sync {
    async fn list(&self) -> Result<Vec<CommandSummary>, TransportError>;

    async fn create(&self, description: &str, command: &str)
    -> Result<CommandSummary, TransportError>;

    async fn update(&self, id: i64, changes: &CommandUpdate)
    -> Result<CommandSummary, TransportError>;

    async fn delete(&self, id: i64) -> Result<String, TransportError>;
}

#[async_trait]
impl CommandApi for ApiClient {
    async fn list(&self) -> Result<Vec<CommandSummary>, TransportError> {
        ApiClient::list(self).await
    }

    async fn create(
        &self,
        description: &str,
        command: &str,
    ) -> Result<CommandSummary, TransportError> {
        ApiClient::create(self, description, command).await
    }

    async fn update(
        &self,
        id: i64,
        changes: &CommandUpdate,
    ) -> Result<CommandSummary, TransportError> {
        ApiClient::update(self, id, changes).await
    }

    async fn delete(&self, id: i64) -> Result<String, TransportError> {
        ApiClient::delete(self, id).await
    }
}

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

pub struct CommandsController<A = ApiClient, C = SystemClipboard> {
    api: A,
    cache: CommandCache,
    notifications: Notifications,
    clipboard: C,
}

impl<A: CommandApi, C: ClipboardSink> CommandsController<A, C> {
    pub fn new(api: A, cache: CommandCache, clipboard: C) -> Self {
        Self {
            api,
            cache,
            notifications: Notifications::default(),
            clipboard,
        }
    }

    pub fn cache(&self) -> &CommandCache {
        &self.cache
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(commands) => {
                self.cache.loaded(commands);
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to load commands");
                self.notifications.error(LOAD_ERROR_MESSAGE);
                false
            }
        }
    }

    pub async fn create(&mut self, description: &str, command: &str) -> bool {
        let Some((description, command)) = self.required_fields(description, command) else {
            return false;
        };

        match self.api.create(&description, &command).await {
            Ok(created) => {
                self.cache.created(created);
                self.notifications.success(CREATED_TOAST);
                true
            }
            Err(e) => self.report(e, "create"),
        }
    }

    pub async fn update(&mut self, id: i64, description: &str, command: &str) -> bool {
        let Some((description, command)) = self.required_fields(description, command) else {
            return false;
        };

        let changes = CommandUpdate {
            description: Some(description),
            command: Some(command),
        };
        match self.api.update(id, &changes).await {
            Ok(updated) => {
                self.cache.updated(updated);
                self.notifications.success(UPDATED_TOAST);
                true
            }
            Err(e) => self.report(e, "update"),
        }
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {
                self.cache.deleted(id);
                self.notifications.success(DELETED_TOAST);
                true
            }
            Err(e) => self.report(e, "delete"),
        }
    }

    pub fn search(&mut self, query: &str) {
        self.cache.set_query(query);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.cache.go_to_page(page)
    }

    /// Put the command text of `id` on the clipboard.
    pub fn copy(&mut self, id: i64) -> bool {
        let Some(text) = self.cache.find(id).map(|c| c.command.clone()) else {
            self.notifications.error(COPY_ERROR_TOAST);
            return false;
        };

        match self.clipboard.set_text(&text) {
            Ok(()) => {
                self.notifications.success(COPIED_TOAST);
                true
            }
            Err(e) => {
                error!(error = %e, command_id = id, "Copy failed");
                self.notifications.error(COPY_ERROR_TOAST);
                false
            }
        }
    }

    // Trimmed fields, or an error toast when either is blank.
    fn required_fields(&mut self, description: &str, command: &str) -> Option<(String, String)> {
        let (description, command) = (description.trim(), command.trim());
        if description.is_empty() || command.is_empty() {
            self.notifications.error(REQUIRED_FIELDS_MESSAGE);
            return None;
        }
        Some((description.to_string(), command.to_string()))
    }

    fn report(&mut self, err: TransportError, operation: &str) -> bool {
        error!(error = %err, operation, "Command request failed");
        self.notifications.error(err.to_string());
        false
    }
}
