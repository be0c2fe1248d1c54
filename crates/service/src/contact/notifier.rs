use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Rendered outbound message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("relay rejected message: status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound notification capability used by contact intake.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            event = "notification_logged",
            "mail relay not configured; notification logged only"
        );
        Ok(())
    }
}
