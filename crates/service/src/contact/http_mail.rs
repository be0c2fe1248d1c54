use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::notifier::{Notification, Notifier, NotifyError};

/// Delivers notifications by POSTing JSON to an HTTP mail relay.
///
/// Body: `{from, to, subject, text, html}`; the API key, when set, is sent
/// as a bearer token.
#[derive(Clone)]
pub struct HttpMailNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl HttpMailNotifier {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, from: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into(), api_key, from: from.into() }
    }

    fn payload<'a>(&'a self, n: &'a Notification) -> RelayPayload<'a> {
        RelayPayload { from: &self.from, to: &n.to, subject: &n.subject, text: &n.text, html: &n.html }
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut req = self.client.post(&self.endpoint).json(&self.payload(notification));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await.map_err(|e| NotifyError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "mail relay accepted notification");
        Ok(())
    }
}
