//! Environment-based configuration types for the mock authorization server.

use anyhow::Result;

use crate::errors::ConfigError;
use crate::oauth::RegistrationMode;

/// Token lifetime applied when JWT_EXPIRES_IN_SECONDS is unset or unusable
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// HTTP server port configuration
#[derive(Clone)]
pub struct HttpPort(u16);

/// Shared JWT signing secret
#[derive(Clone)]
pub struct SigningSecret(String);

/// Issuer claim configuration; `None` defers to the per-request origin
#[derive(Clone)]
pub struct JwtIssuer(Option<String>);

/// Access token lifetime in seconds
#[derive(Clone, Copy)]
pub struct TokenTtl(u64);

/// Allow-list of client names accepted by the server-issued registration policy
#[derive(Clone)]
pub struct AllowedClientNames(Vec<String>);

/// Prefix prepended to generated client identifiers
#[derive(Clone)]
pub struct ClientIdPrefix(String);

/// Main application configuration
#[derive(Clone)]
pub struct Config {
    pub version: String,
    pub http_port: HttpPort,
    pub signing_secret: SigningSecret,
    pub jwt_issuer: JwtIssuer,
    pub token_ttl: TokenTtl,
    pub registration_mode: RegistrationMode,
    pub allowed_client_names: AllowedClientNames,
    pub client_id_prefix: ClientIdPrefix,
    pub storage_backend: String,
    pub database_url: Option<String>,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let signing_secret: SigningSecret = require_env("JWT_SECRET")?.try_into()?;
        let jwt_issuer: JwtIssuer = optional_env("JWT_ISSUER").try_into()?;
        let token_ttl: TokenTtl = optional_env("JWT_EXPIRES_IN_SECONDS").try_into()?;
        let http_port: HttpPort = default_env("HTTP_PORT", "8080").try_into()?;
        let registration_mode: RegistrationMode =
            default_env("REGISTRATION_MODE", "server_issued").try_into()?;
        let allowed_client_names: AllowedClientNames =
            default_env("REGISTRATION_ALLOWED_NAMES", "nhnace-ai-search-test").try_into()?;
        let client_id_prefix: ClientIdPrefix =
            default_env("CLIENT_ID_PREFIX", "nhnace_").try_into()?;
        let storage_backend = default_env("STORAGE_BACKEND", "memory");
        let database_url = optional_env("DATABASE_URL");

        Ok(Self {
            version: version()?,
            http_port,
            signing_secret,
            jwt_issuer,
            token_ttl,
            registration_mode,
            allowed_client_names,
            client_id_prefix,
            storage_backend,
            database_url,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ConfigError::EnvVarRequired(name.to_string()).into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for HttpPort {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self(8080))
        } else {
            value
                .parse::<u16>()
                .map(Self)
                .map_err(|err| ConfigError::PortParsingFailed(err).into())
        }
    }
}

impl AsRef<u16> for HttpPort {
    fn as_ref(&self) -> &u16 {
        &self.0
    }
}

impl TryFrom<String> for SigningSecret {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(ConfigError::EnvVarRequired("JWT_SECRET".to_string()).into())
        } else {
            Ok(Self(value))
        }
    }
}

impl AsRef<str> for SigningSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<Option<String>> for JwtIssuer {
    type Error = anyhow::Error;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        Ok(Self(value.filter(|v| !v.is_empty())))
    }
}

impl AsRef<Option<String>> for JwtIssuer {
    fn as_ref(&self) -> &Option<String> {
        &self.0
    }
}

impl TryFrom<Option<String>> for TokenTtl {
    type Error = anyhow::Error;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        // Unset, non-numeric, and non-positive values all fall back to the default.
        let ttl = value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(|seconds| seconds as u64)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);
        Ok(Self(ttl))
    }
}

impl TryFrom<String> for TokenTtl {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Some(value))
    }
}

impl AsRef<u64> for TokenTtl {
    fn as_ref(&self) -> &u64 {
        &self.0
    }
}

impl TryFrom<String> for RegistrationMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "server_issued" => Ok(RegistrationMode::ServerIssued),
            "caller_issued" => Ok(RegistrationMode::CallerIssued),
            _ => Err(ConfigError::RegistrationModeInvalid(value)),
        }
    }
}

impl TryFrom<Option<String>> for AllowedClientNames {
    type Error = anyhow::Error;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let value = value.unwrap_or_default();
        Ok(Self(
            value
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
        ))
    }
}

impl TryFrom<String> for AllowedClientNames {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Some(value))
    }
}

impl AsRef<Vec<String>> for AllowedClientNames {
    fn as_ref(&self) -> &Vec<String> {
        &self.0
    }
}

impl TryFrom<String> for ClientIdPrefix {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // The prefix lands inside generated client ids, so it is held to the
        // same charset as caller-chosen identifiers.
        if value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Self(value))
        } else {
            Err(ConfigError::ClientIdPrefixInvalid(value))
        }
    }
}

impl AsRef<str> for ClientIdPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_parses_positive_seconds() {
        let ttl: TokenTtl = "120".to_string().try_into().unwrap();
        assert_eq!(*ttl.as_ref(), 120);
    }

    #[test]
    fn test_token_ttl_falls_back_on_unusable_values() {
        for raw in ["abc", "-5", "0", "", "12.5"] {
            let ttl: TokenTtl = raw.to_string().try_into().unwrap();
            assert_eq!(*ttl.as_ref(), DEFAULT_TOKEN_TTL_SECONDS, "input {raw:?}");
        }

        let ttl: TokenTtl = TokenTtl::try_from(None).unwrap();
        assert_eq!(*ttl.as_ref(), DEFAULT_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_signing_secret_rejects_empty_value() {
        assert!(SigningSecret::try_from(String::new()).is_err());
        assert!(SigningSecret::try_from("test-secret".to_string()).is_ok());
    }

    #[test]
    fn test_registration_mode_parses_known_values() {
        assert!(matches!(
            RegistrationMode::try_from("server_issued".to_string()),
            Ok(RegistrationMode::ServerIssued)
        ));
        assert!(matches!(
            RegistrationMode::try_from("caller_issued".to_string()),
            Ok(RegistrationMode::CallerIssued)
        ));
        assert!(RegistrationMode::try_from("both".to_string()).is_err());
    }

    #[test]
    fn test_client_id_prefix_rejects_reserved_characters() {
        assert!(ClientIdPrefix::try_from("nhnace_".to_string()).is_ok());
        assert!(ClientIdPrefix::try_from(String::new()).is_ok());
        assert!(ClientIdPrefix::try_from("bad:prefix".to_string()).is_err());
        assert!(ClientIdPrefix::try_from("spaced prefix".to_string()).is_err());
    }

    #[test]
    fn test_allowed_client_names_splits_and_trims() {
        let names: AllowedClientNames = "alpha, beta ,,gamma".to_string().try_into().unwrap();
        assert_eq!(names.as_ref(), &["alpha", "beta", "gamma"]);
    }
}
