use async_trait::async_trait;

use super::domain::StoredAdmin;
use super::errors::AuthError;

/// Repository abstraction for the admin credential.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn load_admin(&self) -> Result<Option<StoredAdmin>, AuthError>;
    async fn save_admin(&self, admin: StoredAdmin) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialRepository {
        admin: Mutex<Option<StoredAdmin>>,
    }

    impl MockCredentialRepository {
        pub fn with_admin(admin: StoredAdmin) -> Self {
            Self { admin: Mutex::new(Some(admin)) }
        }
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn load_admin(&self) -> Result<Option<StoredAdmin>, AuthError> {
            let admin = self.admin.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(admin.clone())
        }

        async fn save_admin(&self, admin: StoredAdmin) -> Result<(), AuthError> {
            let mut slot = self.admin.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            *slot = Some(admin);
            Ok(())
        }
    }
}
