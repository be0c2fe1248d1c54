mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{read_document, send, send_raw, spawn_app};

#[tokio::test]
async fn contact_defaults_optional_fields() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let payload = json!({"name": "Ann", "email": "ann@example.com", "phone": "", "message": "Need a quote"});

    let (status, body) = send(&app, "POST", "/api/contact", Some(payload)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let (_, messages) = send(&app, "GET", "/api/messages", None).await?;
    let stored = &messages[0];
    assert_eq!(stored["name"], "Ann");
    assert_eq!(stored["phone"], "N/A");
    assert_eq!(stored["company"], "N/A");
    assert!(stored["id"].is_string());
    Ok(())
}

#[tokio::test]
async fn contact_keeps_supplied_values() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let payload = json!({
        "name": "Bob", "email": "bob@example.com", "phone": "+1 555 0100",
        "company": "Acme", "message": "Hello"
    });
    let (status, _) = send(&app, "POST", "/api/contact", Some(payload)).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, messages) = send(&app, "GET", "/api/messages", None).await?;
    assert_eq!(messages[0]["phone"], "+1 555 0100");
    assert_eq!(messages[0]["company"], "Acme");
    Ok(())
}

#[tokio::test]
async fn contact_storage_failure_is_500() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    // corrupt the document after startup
    tokio::fs::write(&app.data_file, b"{ broken").await?;

    let (status, body) = send(&app, "POST", "/api/contact", Some(json!({"name": "X", "email": "x@e.com", "message": "m"}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn contact_malformed_body_is_500_without_write() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let before = read_document(&app).await?;
    let cases = [
        (Some("application/json"), r#"{"name": "x", "phone": 5}"#),
        (Some("application/json"), r#"{"name": ["x"], "email": "x@e.com"}"#),
        (Some("application/json"), r#"{"name": "x", "#),
        (None, r#"{"name": "x", "email": "x@e.com", "message": "m"}"#),
    ];
    for (content_type, body) in cases {
        let (status, reply) = send_raw(&app, "POST", "/api/contact", content_type, body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body}");
        assert_eq!(reply, json!({"success": false, "message": "Failed to submit message"}));
    }
    assert_eq!(read_document(&app).await?, before);
    Ok(())
}
