//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::auth::models::{AdminToken, AdminTokenUuid, NewAdminToken};

const CREATE_ADMIN_TOKEN_SQL: &str = include_str!("sql/create_admin_token.sql");
const FIND_ACTIVE_ADMIN_TOKEN_SQL: &str = include_str!("sql/find_active_admin_token.sql");
const LIST_ADMIN_TOKENS_SQL: &str = include_str!("sql/list_admin_tokens.sql");
const REVOKE_ADMIN_TOKEN_SQL: &str = include_str!("sql/revoke_admin_token.sql");
const TOUCH_ADMIN_TOKEN_SQL: &str = include_str!("sql/touch_admin_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_admin_token(
        &self,
        token: &NewAdminToken,
    ) -> Result<AdminToken, sqlx::Error> {
        query_as::<Postgres, AdminToken>(CREATE_ADMIN_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(&token.name)
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_admin_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<AdminToken>, sqlx::Error> {
        query_as::<Postgres, AdminToken>(FIND_ACTIVE_ADMIN_TOKEN_SQL)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
    }

    /// All admin tokens, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_admin_tokens(&self) -> Result<Vec<AdminToken>, sqlx::Error> {
        query_as::<Postgres, AdminToken>(LIST_ADMIN_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    /// Revoke an active token. Returns `None` when no active token has that UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn revoke_admin_token(
        &self,
        token: AdminTokenUuid,
    ) -> Result<Option<AdminToken>, sqlx::Error> {
        query_as::<Postgres, AdminToken>(REVOKE_ADMIN_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_admin_token(&self, token: AdminTokenUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_ADMIN_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for AdminToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AdminTokenUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
