use std::sync::Arc;

use serde_json::Value;

use crate::auth::domain::StoredAdmin;
use crate::auth::errors::AuthError;
use crate::auth::repository::CredentialRepository;
use crate::storage::JsonDocumentStore;

/// Document field holding the admin credential.
pub const ADMIN_FIELD: &str = "admin";

/// Reads and writes the `admin` field of the site document.
pub struct DocumentCredentialRepository {
    pub document: Arc<JsonDocumentStore>,
}

#[async_trait::async_trait]
impl CredentialRepository for DocumentCredentialRepository {
    async fn load_admin(&self) -> Result<Option<StoredAdmin>, AuthError> {
        let doc = self.document.load().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        match doc.get(ADMIN_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AuthError::Repository(format!("malformed admin field: {e}"))),
        }
    }

    async fn save_admin(&self, admin: StoredAdmin) -> Result<(), AuthError> {
        let value = serde_json::to_value(&admin).map_err(|e| AuthError::Repository(e.to_string()))?;
        self.document
            .transact(|doc| {
                doc.insert(ADMIN_FIELD.to_string(), value);
                Ok(())
            })
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}
