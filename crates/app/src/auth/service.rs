//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::auth::{
    AdminIdentity, AdminToken, AdminTokenUuid, AuthServiceError, IssuedAdminToken, NewAdminToken,
    generate_admin_token, hash_admin_token, repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new admin token. The raw token is only available on the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the token cannot be stored.
    pub async fn issue_admin_token(&self, name: &str) -> Result<IssuedAdminToken, AuthServiceError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AuthServiceError::MissingName);
        }

        let token = generate_admin_token();

        let metadata = self
            .repository
            .create_admin_token(&NewAdminToken {
                uuid: AdminTokenUuid::new(),
                name: name.to_string(),
                token_hash: token.hash(),
            })
            .await?;

        Ok(IssuedAdminToken { token, metadata })
    }

    /// List all admin tokens, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_admin_tokens(&self) -> Result<Vec<AdminToken>, AuthServiceError> {
        Ok(self.repository.list_admin_tokens().await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_admin_token(&self, token: AdminTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_admin_token(token).await?.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AdminIdentity, AuthServiceError> {
        let token = self
            .repository
            .find_active_admin_token(&hash_admin_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort last-used update.
        let _touch_result = self.repository.touch_admin_token(token.uuid).await;

        Ok(AdminIdentity {
            token: token.uuid,
            name: token.name,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the admin it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<AdminIdentity, AuthServiceError>;
}
