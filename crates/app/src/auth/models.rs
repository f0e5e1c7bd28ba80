//! Auth data models.

use jiff::Timestamp;

use crate::{auth::AdminTokenSecret, uuids::TypedUuid};

/// Admin token UUID
pub type AdminTokenUuid = TypedUuid<AdminToken>;

/// Admin token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken {
    pub uuid: AdminTokenUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New admin token persistence payload.
#[derive(Debug, Clone)]
pub struct NewAdminToken {
    pub uuid: AdminTokenUuid,
    pub name: String,
    pub token_hash: String,
}

/// Token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedAdminToken {
    pub token: AdminTokenSecret,
    pub metadata: AdminToken,
}

/// The back-office user behind an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub token: AdminTokenUuid,
    pub name: String,
}
