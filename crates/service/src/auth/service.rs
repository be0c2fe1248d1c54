use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, warn, instrument};

use super::domain::{LoginInput, StoredAdmin};
use super::errors::AuthError;
use super::repository::CredentialRepository;

/// Hash a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// Admin login check independent of web framework
pub struct AuthService<R: CredentialRepository> {
    repo: Arc<R>,
}

impl<R: CredentialRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Check a username/password pair against the stored admin credential.
    ///
    /// The username must match exactly (case-sensitive); the password is
    /// verified against the stored argon2 hash.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, hash_password}, repository::mock::MockCredentialRepository};
    /// use service::auth::domain::{LoginInput, StoredAdmin};
    /// use std::sync::Arc;
    /// let hash = hash_password("Passw0rd").unwrap();
    /// let repo = Arc::new(MockCredentialRepository::with_admin(StoredAdmin::hashed("admin", hash)));
    /// let svc = AuthService::new(repo);
    /// let ok = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd".into() }));
    /// assert!(ok.is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<(), AuthError> {
        let admin = self.repo.load_admin().await?.ok_or(AuthError::Unauthorized)?;
        if admin.username != input.username {
            return Err(AuthError::Unauthorized);
        }

        let Some(hash) = admin.password_hash.as_deref() else {
            warn!("admin credential has no password hash; login refused");
            return Err(AuthError::Unauthorized);
        };
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        info!(event = "admin_login", "admin authenticated");
        Ok(())
    }

    /// Replace a plaintext admin password with its hash. Returns whether the
    /// stored credential changed.
    #[instrument(skip(self))]
    pub async fn upgrade_legacy_credential(&self) -> Result<bool, AuthError> {
        let Some(admin) = self.repo.load_admin().await? else { return Ok(false) };
        if admin.password_hash.is_some() {
            return Ok(false);
        }
        let Some(plain) = admin.password.as_deref() else { return Ok(false) };
        let hash = hash_password(plain)?;
        self.repo.save_admin(StoredAdmin::hashed(admin.username.clone(), hash)).await?;
        warn!(username = %admin.username, event = "legacy_password_upgraded", "plaintext admin password replaced by argon2 hash");
        Ok(true)
    }
}
