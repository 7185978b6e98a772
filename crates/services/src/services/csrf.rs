//! Anti-forgery tokens for the command form.
//!
//! A token is `<nonce>.<hex mac>` where the MAC is HMAC-SHA256 over
//! `scope:nonce`. Tokens carry no expiry and are never stored server side;
//! any token signed with the current secret for the right scope is accepted.

use std::fmt;

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Scope shared by the create, update and delete endpoints.
pub const COMMAND_FORM_SCOPE: &str = "command_form";

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum CsrfError {
    #[error("csrf secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    SecretTooShort(usize),
    #[error("invalid csrf key")]
    InvalidKey,
}

#[derive(Clone)]
pub struct CsrfTokenManager {
    mac: HmacSha256,
}

impl CsrfTokenManager {
    pub fn new(secret: &[u8]) -> Result<Self, CsrfError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(CsrfError::SecretTooShort(secret.len()));
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| CsrfError::InvalidKey)?;
        Ok(Self { mac })
    }

    /// Manager keyed with fresh random bytes; its tokens die with the process.
    pub fn random() -> Result<Self, CsrfError> {
        let mut secret = [0u8; MIN_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(&secret)
    }

    pub fn generate(&self, scope: &str) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let signature = self.signer(scope, &nonce).finalize().into_bytes();
        format!("{nonce}.{}", hex::encode(signature))
    }

    pub fn is_token_valid(&self, scope: &str, token: &str) -> bool {
        let Some((nonce, signature)) = token.split_once('.') else {
            return false;
        };
        if nonce.is_empty() {
            return false;
        }
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };

        // verify_slice compares in constant time
        self.signer(scope, nonce).verify_slice(&signature).is_ok()
    }

    fn signer(&self, scope: &str, nonce: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(scope.as_bytes());
        mac.update(b":");
        mac.update(nonce.as_bytes());
        mac
    }
}

impl fmt::Debug for CsrfTokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfTokenManager").finish_non_exhaustive()
    }
}
