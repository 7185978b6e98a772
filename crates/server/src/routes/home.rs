//! Index page. Its only job is to hand the client an anti-forgery token.

use axum::{
    Router,
    extract::State,
    response::Html,
    routing::get,
};
use deployment::Deployment;
use services::services::csrf::COMMAND_FORM_SCOPE;

use crate::DeploymentImpl;

pub async fn index(State(deployment): State<DeploymentImpl>) -> Html<String> {
    let token = deployment.csrf().generate(COMMAND_FORM_SCOPE);
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Commandes</title></head>
<body>
<main id="commands" data-api="/api">
<input type="hidden" name="_csrf_token" value="{token}">
</main>
</body>
</html>
"#
    ))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/", get(index))
}
