use axum::Router;
use tower_http::trace::TraceLayer;

use crate::DeploymentImpl;

pub mod commands;
pub mod csrf_form;
pub mod home;

pub fn router(deployment: DeploymentImpl) -> Router {
    let api = Router::new().merge(commands::router(&deployment));

    Router::new()
        .merge(home::router(&deployment))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(deployment)
}
