use async_trait::async_trait;
use db::DBService;
use services::services::{
    command::CommandService,
    csrf::{CsrfError, CsrfTokenManager},
    database_validator::{DatabaseValidationError, DatabaseValidator, ValidationResult},
};
use thiserror::Error;

mod config;

pub use config::DeploymentConfig;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Csrf(#[from] CsrfError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Long-lived services shared by every request handler.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    async fn new(config: DeploymentConfig) -> Result<Self, DeploymentError>;

    fn db(&self) -> &DBService;

    fn commands(&self) -> &CommandService;

    fn csrf(&self) -> &CsrfTokenManager;

    async fn validate_database(&self) -> Result<ValidationResult, DatabaseValidationError> {
        DatabaseValidator::new(self.db().pool.clone()).validate().await
    }
}
