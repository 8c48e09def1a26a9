//! OAuth 2.0 core types for client registration and the Client Credentials grant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth 2.0 Grant Types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    ClientCredentials,
}

/// OAuth 2.0 Token Types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    #[serde(rename = "Bearer")]
    Bearer,
}

/// Stored client registration record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique client identifier
    pub client_id: String,
    /// Client secret, checked on every token request
    pub client_secret: String,
    /// Client display name
    pub client_name: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Projection of [`ClientRecord`] with the secret stripped.
///
/// The only representation a lookup caller ever receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPublicView {
    /// Unique client identifier
    pub client_id: String,
    /// Client display name
    pub client_name: String,
}

impl From<&ClientRecord> for ClientPublicView {
    fn from(record: &ClientRecord) -> Self {
        Self {
            client_id: record.client_id.clone(),
            client_name: record.client_name.clone(),
        }
    }
}

/// Server-issued registration response.
///
/// Carries the secret; it is returned exactly once, at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedClient {
    /// Unique client identifier
    pub client_id: String,
    /// Generated client secret
    pub client_secret: String,
    /// Client display name, echoed from the request
    pub client_name: String,
}

/// Client registration request body.
///
/// A single body shape serves both registration modes; the configured mode
/// decides which fields must be present and which are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Client display name
    pub client_name: Option<String>,
    /// Caller-chosen client identifier (caller-issued mode only)
    pub client_id: Option<String>,
    /// Caller-chosen client secret (caller-issued mode only)
    pub client_secret: Option<String>,
}

/// Validated token request
#[derive(Debug, Clone)]
pub struct TokenRequest {
    /// Requested grant type
    pub grant_type: GrantType,
    /// Client identifier
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

/// Token endpoint success payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: TokenType,
    /// Configured token lifetime in seconds
    pub expires_in: u64,
}

/// OAuth error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    /// Error code from the taxonomy
    pub error: String,
    /// Human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
