//! Stateless HS256 signing and verification of access tokens.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer
    pub iss: String,
    /// Subject, the authenticated client id
    pub sub: String,
    /// Issued-at, whole seconds since epoch
    pub iat: i64,
    /// Expiry, whole seconds since epoch
    pub exp: i64,
}

/// Signs and verifies compact HS256 tokens with an injected shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    /// Create a signer bound to the given shared secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for `subject`, valid for `ttl_seconds` from now
    pub fn sign(
        &self,
        subject: &str,
        issuer: &str,
        ttl_seconds: u64,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl_seconds as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Signature failures and expiry report as distinct errors, with the
    /// signature checked first. A token is expired from `now == exp` onward.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced below: the library check applies 60s of leeway
        // and keeps a token valid through its expiry second.
        validation.validate_exp = false;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::SignatureInvalid(e.to_string()))?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
