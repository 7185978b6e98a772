//! Command payloads shared by the server and its HTTP clients.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Description et commande requises";

/// Public shape of a command, as listed by the API and cached by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct CommandSummary {
    #[ts(type = "number")]
    pub id: i64,
    pub description: String,
    pub command: String,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct CommandUpdate {
    pub description: Option<String>,
    pub command: Option<String>,
}

impl CommandUpdate {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            command: None,
        }
    }

    pub fn command(command: impl Into<String>) -> Self {
        Self {
            description: None,
            command: Some(command.into()),
        }
    }
}
