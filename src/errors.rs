//! Standardized error types following the `error-mockauth-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when a required environment variable is not set
    #[error("error-mockauth-config-1 {0} must be set")]
    EnvVarRequired(String),

    /// Error when HTTP_PORT cannot be parsed
    #[error("error-mockauth-config-2 Parsing HTTP_PORT into u16 failed: {0:?}")]
    PortParsingFailed(std::num::ParseIntError),

    /// Error when version information is not available
    #[error("error-mockauth-config-3 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when REGISTRATION_MODE holds an unknown value
    #[error(
        "error-mockauth-config-4 Unknown registration mode '{0}': expected server_issued or caller_issued"
    )]
    RegistrationModeInvalid(String),

    /// Error when CLIENT_ID_PREFIX would produce invalid identifiers
    #[error("error-mockauth-config-5 Client id prefix '{0}' may only contain letters, digits, '-' and '_'")]
    ClientIdPrefixInvalid(String),
}

/// Client registration errors
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Client name missing or blank
    #[error("error-mockauth-register-1 Invalid client name: {0}")]
    InvalidClientName(String),

    /// Caller-chosen client identifier violates the charset or length rules
    #[error("error-mockauth-register-2 Invalid client id: {0}")]
    InvalidClientId(String),

    /// Caller-chosen client secret is too short
    #[error("error-mockauth-register-3 Invalid client secret: {0}")]
    InvalidClientSecret(String),

    /// Request body shape does not match the configured registration mode
    #[error("error-mockauth-register-4 Request not valid for the configured registration mode: {0}")]
    ModeMismatch(String),

    /// Registration policy rejected the client name
    #[error("error-mockauth-register-5 Client name not allowed: {0}")]
    NotAllowed(String),

    /// Caller-chosen client identifier already registered
    #[error("error-mockauth-register-6 Client id already registered: {0}")]
    ClientIdTaken(String),

    /// Every generation attempt collided with an existing identifier
    #[error("error-mockauth-register-7 Unable to allocate an unused client id")]
    GenerationExhausted,

    /// Underlying storage failed
    #[error("error-mockauth-register-8 Storage failure: {0}")]
    StorageFailure(String),
}

/// OAuth token endpoint errors
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Invalid request
    #[error("error-mockauth-oauth-1 Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client credentials
    #[error("error-mockauth-oauth-2 Invalid client credentials: {0}")]
    InvalidClient(String),

    /// Unsupported grant type
    #[error("error-mockauth-oauth-3 Unsupported grant type: {0}")]
    UnsupportedGrantType(String),

    /// Server error
    #[error("error-mockauth-oauth-4 Server error: {0}")]
    ServerError(String),
}

/// Token signing and verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Error when token signing fails
    #[error("error-mockauth-token-1 Token signing failed: {0}")]
    SigningFailed(String),

    /// Token integrity check failed or the token is malformed
    #[error("error-mockauth-token-2 Invalid token signature: {0}")]
    SignatureInvalid(String),

    /// Token is at or past its expiry time
    #[error("error-mockauth-token-3 Token expired")]
    Expired,
}

/// Database/storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when database connection fails
    #[error("error-mockauth-storage-1 Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Error when data serialization fails
    #[error("error-mockauth-storage-2 Data serialization failed: {0}")]
    SerializationFailed(String),

    /// Error when database operation fails
    #[error("error-mockauth-storage-3 Database error: {0}")]
    DatabaseError(String),

    /// Error when data validation fails
    #[error("error-mockauth-storage-4 Invalid data: {0}")]
    InvalidData(String),
}
