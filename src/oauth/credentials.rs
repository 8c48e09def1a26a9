//! Cryptographically random client identifier and secret generation.

use base64::prelude::*;
use rand::Rng;

/// Freshly generated client credentials
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    /// Prefixed, URL-safe client identifier
    pub client_id: String,
    /// URL-safe client secret
    pub client_secret: String,
}

/// Generates client identifiers and secrets from the thread-local CSPRNG
#[derive(Debug, Clone)]
pub struct CredentialGenerator {
    id_prefix: String,
}

impl CredentialGenerator {
    /// Create a generator whose identifiers carry the given textual prefix
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
        }
    }

    /// Generate a fresh identifier/secret pair.
    ///
    /// Identifiers carry 128 bits of entropy and secrets 256; callers still
    /// treat identifier collisions as possible.
    pub fn generate(&self) -> ClientCredentials {
        let mut rng = rand::thread_rng();
        let id_bytes: [u8; 16] = rng.r#gen();
        let secret_bytes: [u8; 32] = rng.r#gen();
        ClientCredentials {
            client_id: format!(
                "{}{}",
                self.id_prefix,
                BASE64_URL_SAFE_NO_PAD.encode(id_bytes)
            ),
            client_secret: BASE64_URL_SAFE_NO_PAD.encode(secret_bytes),
        }
    }
}
