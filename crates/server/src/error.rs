use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::command::CommandServiceError;
use thiserror::Error;
use utils::response::MessageResponse;

const INTERNAL_MESSAGE: &str = "Erreur interne du serveur";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Token CSRF invalide")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("Commande non trouvée")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<CommandServiceError> for ApiError {
    fn from(err: CommandServiceError) -> Self {
        match err {
            CommandServiceError::Database(e) => ApiError::Database(e),
            CommandServiceError::Validation(message) => ApiError::Validation(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
