use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Admin credential as found in the document.
///
/// Older documents carry a plaintext `password`; those are rewritten to a
/// `password_hash` by [`AuthService::upgrade_legacy_credential`].
///
/// [`AuthService::upgrade_legacy_credential`]: super::service::AuthService::upgrade_legacy_credential
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredAdmin {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl StoredAdmin {
    pub fn hashed(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self { username: username.into(), password_hash: Some(password_hash.into()), password: None }
    }

    pub fn is_legacy(&self) -> bool {
        self.password_hash.is_none() && self.password.is_some()
    }
}
