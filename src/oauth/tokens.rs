//! Token issuance for the Client Credentials grant.

use crate::errors::OAuthError;
use crate::oauth::signer::TokenSigner;
use crate::oauth::types::{GrantType, TokenRequest, TokenResponse, TokenType};
use crate::storage::traits::ClientStore;
use serde::Deserialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Client-facing detail for every credential failure; unknown ids and wrong
/// secrets are indistinguishable
const INVALID_CREDENTIALS: &str = "client authentication failed";

/// Raw token endpoint form payload
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    /// Requested grant type
    pub grant_type: Option<String>,
    /// Client identifier
    pub client_id: Option<String>,
    /// Client secret
    pub client_secret: Option<String>,
}

impl TryFrom<TokenForm> for TokenRequest {
    type Error = OAuthError;

    fn try_from(form: TokenForm) -> Result<Self, Self::Error> {
        let grant_type = match form.grant_type.as_deref() {
            Some("client_credentials") => GrantType::ClientCredentials,
            Some(other) => return Err(OAuthError::UnsupportedGrantType(other.to_string())),
            None => {
                return Err(OAuthError::UnsupportedGrantType(
                    "grant_type must be client_credentials".to_string(),
                ));
            }
        };

        let client_id = form.client_id.filter(|v| !v.is_empty()).ok_or_else(|| {
            OAuthError::InvalidRequest("client_id and client_secret required".to_string())
        })?;
        let client_secret = form.client_secret.filter(|v| !v.is_empty()).ok_or_else(|| {
            OAuthError::InvalidRequest("client_id and client_secret required".to_string())
        })?;

        Ok(Self {
            grant_type,
            client_id,
            client_secret,
        })
    }
}

/// Verifies client credentials and mints bearer tokens
pub struct TokenService {
    store: Arc<dyn ClientStore>,
    signer: TokenSigner,
    issuer: Option<String>,
    ttl_seconds: u64,
}

impl TokenService {
    /// Create a token service with an injected signer, issuer, and lifetime
    pub fn new(
        store: Arc<dyn ClientStore>,
        signer: TokenSigner,
        issuer: Option<String>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            signer,
            issuer,
            ttl_seconds,
        }
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// `issuer_fallback` is used as the `iss` claim when no issuer is
    /// configured. `expires_in` always reports the configured lifetime.
    pub async fn issue_token(
        &self,
        client_id: &str,
        client_secret: &str,
        issuer_fallback: &str,
    ) -> Result<TokenResponse, OAuthError> {
        let record = self
            .store
            .get_client(client_id)
            .await
            .map_err(|e| OAuthError::ServerError(e.to_string()))?;

        let Some(record) = record else {
            tracing::debug!(client_id, "token request for unknown client");
            return Err(OAuthError::InvalidClient(INVALID_CREDENTIALS.to_string()));
        };

        if !secrets_match(&record.client_secret, client_secret) {
            tracing::debug!(client_id, "token request with mismatched secret");
            return Err(OAuthError::InvalidClient(INVALID_CREDENTIALS.to_string()));
        }

        let issuer = self.issuer.as_deref().unwrap_or(issuer_fallback);
        let access_token = self
            .signer
            .sign(client_id, issuer, self.ttl_seconds)
            .map_err(|e| OAuthError::ServerError(e.to_string()))?;

        Ok(TokenResponse {
            access_token,
            token_type: TokenType::Bearer,
            expires_in: self.ttl_seconds,
        })
    }
}

fn secrets_match(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::types::ClientRecord;
    use crate::storage::inmemory::MemoryClientStore;
    use chrono::Utc;

    const SECRET: &str = "test-signing-secret";

    async fn service_with_client(issuer: Option<String>) -> TokenService {
        let store = Arc::new(MemoryClientStore::new());
        store
            .put_client(&ClientRecord {
                client_id: "nhnace_client".to_string(),
                client_secret: "correct-secret".to_string(),
                client_name: "demo".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        TokenService::new(store, TokenSigner::new(SECRET), issuer, 3600)
    }

    #[tokio::test]
    async fn test_issue_token_signs_for_the_client() {
        let service = service_with_client(None).await;

        let response = service
            .issue_token("nhnace_client", "correct-secret", "http://localhost")
            .await
            .unwrap();
        assert_eq!(response.token_type, TokenType::Bearer);
        assert_eq!(response.expires_in, 3600);

        let claims = TokenSigner::new(SECRET).verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, "nhnace_client");
        assert_eq!(claims.iss, "http://localhost");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_configured_issuer_wins_over_fallback() {
        let service = service_with_client(Some("https://auth.example".to_string())).await;

        let response = service
            .issue_token("nhnace_client", "correct-secret", "http://localhost")
            .await
            .unwrap();
        let claims = TokenSigner::new(SECRET).verify(&response.access_token).unwrap();
        assert_eq!(claims.iss, "https://auth.example");
    }

    #[tokio::test]
    async fn test_unknown_id_and_wrong_secret_are_indistinguishable() {
        let service = service_with_client(None).await;

        let unknown = service
            .issue_token("no-such-client", "correct-secret", "http://localhost")
            .await
            .unwrap_err();
        let mismatched = service
            .issue_token("nhnace_client", "wrong-secret", "http://localhost")
            .await
            .unwrap_err();

        assert!(matches!(unknown, OAuthError::InvalidClient(_)));
        assert_eq!(unknown.to_string(), mismatched.to_string());
    }

    #[test]
    fn test_form_conversion_gates_grant_type() {
        let form = TokenForm {
            grant_type: Some("password".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
        };
        assert!(matches!(
            TokenRequest::try_from(form),
            Err(OAuthError::UnsupportedGrantType(_))
        ));

        let form = TokenForm {
            grant_type: None,
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
        };
        assert!(matches!(
            TokenRequest::try_from(form),
            Err(OAuthError::UnsupportedGrantType(_))
        ));
    }

    #[test]
    fn test_form_conversion_requires_credentials() {
        let form = TokenForm {
            grant_type: Some("client_credentials".to_string()),
            client_id: Some("id".to_string()),
            client_secret: None,
        };
        assert!(matches!(
            TokenRequest::try_from(form),
            Err(OAuthError::InvalidRequest(_))
        ));

        let form = TokenForm {
            grant_type: Some("client_credentials".to_string()),
            client_id: Some("".to_string()),
            client_secret: Some("secret".to_string()),
        };
        assert!(matches!(
            TokenRequest::try_from(form),
            Err(OAuthError::InvalidRequest(_))
        ));

        let form = TokenForm {
            grant_type: Some("client_credentials".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
        };
        let request = TokenRequest::try_from(form).unwrap();
        assert_eq!(request.grant_type, GrantType::ClientCredentials);
        assert_eq!(request.client_id, "id");
    }

    #[test]
    fn test_secret_comparison_is_exact() {
        assert!(secrets_match("abc", "abc"));
        assert!(!secrets_match("abc", "abd"));
        assert!(!secrets_match("abc", "abcd"));
        assert!(!secrets_match("abc", ""));
    }
}
