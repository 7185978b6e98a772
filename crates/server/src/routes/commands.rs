//! Routes for listing and editing saved commands.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{delete, get, patch, post},
};
use deployment::Deployment;
use serde::{Deserialize, de::IgnoredAny};
use utils::{
    command::{CommandSummary, CommandUpdate},
    response::{DataResponse, MessageResponse},
};

use super::csrf_form::CsrfForm;
use crate::{DeploymentImpl, error::ApiError};

pub const CREATED_MESSAGE: &str = "Commande ajoutée";
pub const UPDATED_MESSAGE: &str = "Commande mise à jour";
pub const DELETED_MESSAGE: &str = "Commande supprimée";

/// Body of `POST /api/new`. Missing fields are reported as a validation
/// error by the service rather than by deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommandRequest {
    pub description: Option<String>,
    pub command: Option<String>,
}

/// GET /api/commandes
pub async fn list_commands(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<Vec<CommandSummary>>, ApiError> {
    let commands = deployment.commands().find_all().await?;
    Ok(ResponseJson(commands))
}

/// POST /api/new
pub async fn create_command(
    State(deployment): State<DeploymentImpl>,
    CsrfForm(payload): CsrfForm<CreateCommandRequest>,
) -> Result<(StatusCode, ResponseJson<DataResponse<CommandSummary>>), ApiError> {
    let command = deployment
        .commands()
        .create(
            payload.description.as_deref().unwrap_or_default(),
            payload.command.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(MessageResponse::new(CREATED_MESSAGE).with(command)),
    ))
}

/// The `{id}` segment is taken as text so that the token is always checked
/// first. An id that is not an integer cannot name a stored command.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// PATCH /api/update/{id}
pub async fn update_command(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<String>,
    CsrfForm(changes): CsrfForm<CommandUpdate>,
) -> Result<ResponseJson<DataResponse<CommandSummary>>, ApiError> {
    let id = parse_id(&id)?;
    let command = deployment
        .commands()
        .update(id, changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(ResponseJson(MessageResponse::new(UPDATED_MESSAGE).with(command)))
}

/// DELETE /api/delete/{id}
pub async fn delete_command(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<String>,
    CsrfForm(_): CsrfForm<IgnoredAny>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    if !deployment.commands().delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(ResponseJson(MessageResponse::new(DELETED_MESSAGE)))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new()
        .route("/commandes", get(list_commands))
        .route("/new", post(create_command))
        .route("/update/{id}", patch(update_command))
        .route("/delete/{id}", delete(delete_command))
}
