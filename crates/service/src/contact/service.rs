use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::domain::ContactInput;
use super::notifier::Notifier;
use super::template;
use crate::errors::ServiceError;
use crate::resource::{record::ID, registry::MESSAGES, ResourceStore};

/// Result of the detached notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Failed(String),
}

/// Stored record plus a handle to the notification task.
///
/// Dropping the handle detaches the task; it still runs to completion.
pub struct ContactSubmission {
    pub record: Value,
    pub notification: JoinHandle<NotifyOutcome>,
}

pub struct ContactService {
    store: Arc<dyn ResourceStore>,
    notifier: Arc<dyn Notifier>,
    recipient: String,
}

impl ContactService {
    pub fn new(store: Arc<dyn ResourceStore>, notifier: Arc<dyn Notifier>, recipient: impl Into<String>) -> Self {
        Self { store, notifier, recipient: recipient.into() }
    }

    /// Append the inquiry to `messages`, then schedule the notification.
    ///
    /// A storage failure is returned and no notification is attempted.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn submit(&self, input: ContactInput) -> Result<ContactSubmission, ServiceError> {
        let record = self.store.create(MESSAGES, input.into_fields()).await?;
        let id = record.get(ID).and_then(Value::as_str).unwrap_or_default().to_string();
        info!(%id, event = "contact_stored", "contact inquiry stored");

        let notification = template::contact_notification(&record, &self.recipient);
        let notifier = Arc::clone(&self.notifier);
        let handle = tokio::spawn(async move {
            match notifier.notify(&notification).await {
                Ok(()) => {
                    info!(%id, to = %notification.to, event = "contact_notified", "contact notification sent");
                    NotifyOutcome::Sent
                }
                Err(e) => {
                    error!(%id, error = %e, event = "contact_notify_failed", "contact notification failed");
                    NotifyOutcome::Failed(e.to_string())
                }
            }
        });

        Ok(ContactSubmission { record, notification: handle })
    }
}
