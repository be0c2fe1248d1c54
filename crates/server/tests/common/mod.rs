#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub data_file: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_file);
    }
}

/// Write a document with an admin (`admin` / `S3curePass!`) and one post.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let data_file = std::env::temp_dir().join(format!("content_api_{}.json", Uuid::new_v4()));
    let hash = service::auth::service::hash_password("S3curePass!")?;
    let doc = json!({
        "admin": {"username": "admin", "password_hash": hash},
        "hero": {"title": "Welcome", "subtitle": "We build things"},
        "posts": [{"id": "seed-1", "created_at": "2024-01-01T00:00:00.000Z", "title": "First"}],
        "services": [],
        "metrics": [],
        "process": [],
        "messages": []
    });
    tokio::fs::write(&data_file, serde_json::to_vec_pretty(&doc)?).await?;

    let mut cfg = configs::AppConfig::default();
    cfg.storage.data_file = data_file.to_string_lossy().into_owned();
    cfg.server.static_dir = "/nonexistent-static-for-tests".into();
    let router = server::startup::build_app(&cfg).await?;
    Ok(TestApp { router, data_file })
}

pub async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    dispatch(app, req).await
}

/// Send raw bytes, optionally without a content type. A non-JSON reply
/// comes back as `Value::Null`.
pub async fn send_raw(
    app: &TestApp,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    dispatch(app, builder.body(Body::from(body))?).await
}

async fn dispatch(app: &TestApp, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

pub async fn read_document(app: &TestApp) -> anyhow::Result<Value> {
    Ok(serde_json::from_slice(&tokio::fs::read(&app.data_file).await?)?)
}
