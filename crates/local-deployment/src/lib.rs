use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use deployment::{Deployment, DeploymentConfig, DeploymentError};
use services::services::{command::CommandService, csrf::CsrfTokenManager};
use tracing::{info, warn};
use utils::assets::default_database_url;

#[derive(Clone)]
pub struct LocalDeployment {
    db: DBService,
    commands: CommandService,
    csrf: CsrfTokenManager,
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new(config: DeploymentConfig) -> Result<Self, DeploymentError> {
        let db = if config.is_in_memory() {
            DBService::new_in_memory().await?
        } else {
            let url = match &config.database_url {
                Some(url) => url.clone(),
                None => default_database_url()?,
            };
            DBService::new(&url).await?
        };

        let csrf = match &config.csrf_secret {
            Some(secret) => CsrfTokenManager::new(secret.as_bytes())?,
            None => {
                warn!("CSRF_SECRET not set, using a random secret; issued tokens will not survive a restart");
                CsrfTokenManager::random()?
            }
        };

        let commands = CommandService::new(Arc::new(db.repository()));
        info!(host = %config.host, port = config.port, "Local deployment initialised");

        Ok(Self {
            db,
            commands,
            csrf,
        })
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn commands(&self) -> &CommandService {
        &self.commands
    }

    fn csrf(&self) -> &CsrfTokenManager {
        &self.csrf
    }
}

#[cfg(test)]
mod tests {
    use services::services::csrf::COMMAND_FORM_SCOPE;

    use super::*;

    fn in_memory_config(secret: Option<&str>) -> DeploymentConfig {
        DeploymentConfig {
            database_url: Some("sqlite::memory:".to_string()),
            csrf_secret: secret.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_in_memory_deployment_is_usable() {
        let deployment = LocalDeployment::new(in_memory_config(None)).await.unwrap();

        assert!(deployment.validate_database().await.unwrap().is_ok());
        deployment.commands().create("List files", "ls -la").await.unwrap();
        assert_eq!(deployment.commands().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_configured_secret_is_stable_across_instances() {
        let secret = "0123456789abcdef0123456789abcdef";
        let a = LocalDeployment::new(in_memory_config(Some(secret))).await.unwrap();
        let b = LocalDeployment::new(in_memory_config(Some(secret))).await.unwrap();

        let token = a.csrf().generate(COMMAND_FORM_SCOPE);
        assert!(b.csrf().is_token_valid(COMMAND_FORM_SCOPE, &token));
    }

    #[tokio::test]
    async fn test_short_secret_fails_startup() {
        let result = LocalDeployment::new(in_memory_config(Some("short"))).await;
        assert!(matches!(result, Err(DeploymentError::Csrf(_))));
    }
}
