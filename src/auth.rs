//! `Auth-Key` header computation.
//!
//! Two schemes are supported:
//! - `hmac_sha256`: lowercase hex HMAC-SHA256 over the username, keyed by
//!   the API key. Deterministic, so the provider can verify it by equality.
//! - `bcrypt`: `$2y$` bcrypt digest of `username + api_key`, the scheme used
//!   by the provider's own PHP integration. A fresh salt is drawn on every
//!   call, so two headers for identical credentials never match.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{ClientError, ClientResult};

type HmacSha256 = Hmac<Sha256>;

/// PHP's `password_hash` default cost
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    #[default]
    HmacSha256,
    Bcrypt,
}

/// Computes the per-request `Auth-Key` value.
#[derive(Clone)]
pub struct AuthSigner {
    username: String,
    api_key: String,
    scheme: AuthScheme,
}

impl AuthSigner {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>, scheme: AuthScheme) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            scheme,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Recomputed on every request; nothing is cached.
    pub fn auth_key(&self) -> ClientResult<String> {
        match self.scheme {
            AuthScheme::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(self.api_key.as_bytes())
                    .map_err(|e| ClientError::Auth(format!("invalid HMAC key: {}", e)))?;
                mac.update(self.username.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
            AuthScheme::Bcrypt => {
                let material = format!("{}{}", self.username, self.api_key);
                let parts = bcrypt::hash_with_result(material, BCRYPT_COST)
                    .map_err(|e| ClientError::Auth(e.to_string()))?;
                Ok(parts.format_for_version(bcrypt::Version::TwoY))
            }
        }
    }
}
