//! Admin token generation and hashing.

use std::fmt::{self, Write};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Admin token prefix.
pub const ADMIN_TOKEN_PREFIX: &str = "tpr";

/// Number of secret bytes encoded in a token.
pub const ADMIN_TOKEN_SECRET_BYTES: usize = 32;

/// Raw admin token. Only ever shown once, when issued.
#[derive(Clone)]
pub struct AdminTokenSecret {
    token: String,
}

impl AdminTokenSecret {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// SHA-256 digest stored in place of the token.
    #[must_use]
    pub fn hash(&self) -> String {
        hash_admin_token(&self.token)
    }
}

impl fmt::Debug for AdminTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminTokenSecret(**redacted**)")
    }
}

impl Drop for AdminTokenSecret {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

/// Generate a new random admin token.
#[must_use]
pub fn generate_admin_token() -> AdminTokenSecret {
    let mut secret = [0_u8; ADMIN_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let token = format_admin_token(&secret);

    secret.zeroize();

    AdminTokenSecret { token }
}

fn format_admin_token(secret: &[u8; ADMIN_TOKEN_SECRET_BYTES]) -> String {
    let mut token = String::with_capacity(ADMIN_TOKEN_PREFIX.len() + 1 + ADMIN_TOKEN_SECRET_BYTES * 2);

    token.push_str(ADMIN_TOKEN_PREFIX);
    token.push('_');

    for byte in secret {
        let _infallible = write!(token, "{byte:02x}");
    }

    token
}

/// Hex-encoded SHA-256 digest of a raw token.
#[must_use]
pub fn hash_admin_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.trim().as_bytes()))
}
