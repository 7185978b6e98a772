use client::{
    ApiClient, CommandCache, CommandsController, TransportError,
    controller::{ClipboardError, ClipboardSink},
    notification::ToastKind,
};
use deployment::{Deployment, DeploymentConfig};
use server::{DeploymentImpl, routes};
use services::services::command::CommandUpdate;
use tokio::net::TcpListener;

struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("headless".into()))
    }
}

async fn spawn_server() -> String {
    let deployment = DeploymentImpl::new(DeploymentConfig {
        database_url: Some("sqlite::memory:".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes::router(deployment)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn created_entry_is_listed_with_identical_fields() {
    let url = spawn_server().await;
    let mut api = ApiClient::new(&url);
    api.fetch_csrf_token().await.unwrap();

    let created = api.create("Follow logs", "journalctl -fu nginx").await.unwrap();
    let listed = api.list().await.unwrap();

    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(listed[0].description, "Follow logs");
    assert_eq!(listed[0].command, "journalctl -fu nginx");

    let updated = api
        .update(created.id, &CommandUpdate::command("journalctl -fu caddy"))
        .await
        .unwrap();
    assert_eq!(updated.description, "Follow logs");
    assert_eq!(updated.command, "journalctl -fu caddy");

    assert_eq!(api.delete(created.id).await.unwrap(), "Commande supprimée");
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_token_surfaces_server_message() {
    let url = spawn_server().await;
    let api = ApiClient::new(&url);

    let err = api.create("List", "ls").await.unwrap_err();
    match err {
        TransportError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Token CSRF invalide");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn controller_cache_matches_server_after_mutations() {
    let url = spawn_server().await;
    let mut api = ApiClient::new(&url);
    api.fetch_csrf_token().await.unwrap();
    let mut controller = CommandsController::new(api.clone(), CommandCache::default(), NoClipboard);

    assert!(controller.load().await);
    assert!(controller.create("List files", "ls -la").await);
    assert!(controller.create("Disk usage", "du -sh").await);
    let id = controller.cache().all()[1].id;
    assert!(controller.update(id, "List all files", "ls -la").await);
    let gone = controller.cache().all()[0].id;
    assert!(controller.delete(gone).await);

    assert_eq!(controller.cache().all(), api.list().await.unwrap().as_slice());

    assert!(!controller.delete(gone).await);
    let toast = controller.notifications().last().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Commande non trouvée");

    assert!(!controller.copy(id));
}

#[tokio::test]
async fn unreachable_server_becomes_error_toast() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller = CommandsController::new(
        ApiClient::new(format!("http://{addr}")),
        CommandCache::default(),
        NoClipboard,
    );
    assert!(!controller.load().await);
    assert_eq!(
        controller.notifications().last().unwrap().message,
        "Erreur lors du chargement des commandes"
    );
}
