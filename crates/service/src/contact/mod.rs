//! Contact intake: persist an inquiry into `messages`, then notify.
//!
//! The stored record is authoritative. Notification runs afterwards on a
//! detached task and its outcome is only logged.

pub mod domain;
pub mod http_mail;
pub mod notifier;
pub mod service;
pub mod template;

pub use domain::ContactInput;
pub use http_mail::HttpMailNotifier;
pub use notifier::{LogNotifier, Notification, Notifier, NotifyError};
pub use service::{ContactService, ContactSubmission, NotifyOutcome};
