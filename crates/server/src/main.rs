use anyhow::Context;
use deployment::{Deployment, DeploymentConfig};
use server::{DeploymentImpl, routes};
use tokio::net::TcpListener;
use tracing::{error, info};
use utils::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DeploymentConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);
    let deployment = DeploymentImpl::new(config).await?;

    let validation = deployment.validate_database().await?;
    if !validation.is_ok() {
        anyhow::bail!(validation.summary());
    }
    info!("{}", validation.summary());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, routes::router(deployment))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
