//! Opaque session tokens.
//!
//! A token is 32 bytes from the thread-local CSPRNG, base64 URL-safe
//! encoded without padding (43 characters). It carries no claims — its only
//! meaning is the database row it matches — so possession of the string is
//! the whole credential and it must never appear in logs.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Raw entropy per token, before encoding.
pub const TOKEN_BYTES: usize = 32;

/// An unguessable opaque session token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// The token is the credential; Debug must not print it.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}
