use std::{path::PathBuf, sync::Arc};

use axum::Router;
use configs::{AppConfig, MailConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::{
    auth::{domain::StoredAdmin, repo::document::{DocumentCredentialRepository, ADMIN_FIELD}, service::hash_password, AuthService},
    contact::{ContactService, HttpMailNotifier, LogNotifier, Notifier},
    errors::ServiceError,
    resource::{JsonResourceStore, ResourceRegistry, ResourceStore},
    runtime,
    storage::{Document, JsonDocumentStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn build_notifier(mail: &MailConfig) -> Arc<dyn Notifier> {
    match (&mail.relay_url, mail.relay_enabled()) {
        (Some(url), true) => {
            info!(relay = %url, "contact notifications via mail relay");
            Arc::new(HttpMailNotifier::new(url.clone(), mail.api_key.clone(), mail.from.clone()))
        }
        _ => {
            warn!("mail relay or recipient not configured; contact notifications are logged only");
            Arc::new(LogNotifier)
        }
    }
}

/// Empty resources plus an admin from `ADMIN_USERNAME`/`ADMIN_PASSWORD`.
fn seed_document(registry: &ResourceRegistry) -> Result<Document, StartupError> {
    let mut doc = registry.skeleton();
    match (std::env::var("ADMIN_USERNAME"), std::env::var("ADMIN_PASSWORD")) {
        (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
            let hash = hash_password(&password)?;
            let admin = serde_json::to_value(StoredAdmin::hashed(username, hash))
                .map_err(|e| StartupError::Document(ServiceError::storage(e)))?;
            doc.insert(ADMIN_FIELD.to_string(), admin);
        }
        _ => warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; seeded document has no admin"),
    }
    Ok(doc)
}

/// Open the data document and wire the services on top of it.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let data_file = PathBuf::from(&cfg.storage.data_file);
    runtime::ensure_env(&cfg.server.static_dir, &data_file).await?;

    let registry = ResourceRegistry::site();
    let opened = if cfg.storage.seed_if_missing && tokio::fs::metadata(&data_file).await.is_err() {
        let seed = seed_document(&registry)?;
        JsonDocumentStore::open_or_seed(&data_file, move || seed).await
    } else {
        JsonDocumentStore::open(&data_file).await
    };
    let document = opened.map_err(StartupError::Document)?;

    let auth = Arc::new(AuthService::new(Arc::new(DocumentCredentialRepository {
        document: Arc::clone(&document),
    })));
    auth.upgrade_legacy_credential().await?;

    let resources: Arc<dyn ResourceStore> = JsonResourceStore::new(document, registry);
    let contact = Arc::new(ContactService::new(
        Arc::clone(&resources),
        build_notifier(&cfg.mail),
        cfg.mail.recipient.clone().unwrap_or_default(),
    ));

    Ok(ServerState { resources, contact, auth })
}

/// Build the router for a config; used by `run_with_config` and tests.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Serve with an already loaded configuration until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, data_file = %cfg.storage.data_file, "content api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
