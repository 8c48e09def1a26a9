//! Client registration with server-issued and caller-issued credential modes.

use crate::errors::RegistrationError;
use crate::oauth::credentials::CredentialGenerator;
use crate::oauth::policy::RegistrationPolicy;
use crate::oauth::types::{ClientPublicView, ClientRecord, IssuedClient, RegisterRequest};
use crate::storage::traits::ClientStore;
use chrono::Utc;
use std::sync::Arc;

/// Upper bound on identifier generation attempts per registration
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Maximum length of a caller-chosen client identifier
const CLIENT_ID_MAX_LENGTH: usize = 128;

/// Minimum length of a caller-chosen client secret
const CLIENT_SECRET_MIN_LENGTH: usize = 8;

/// How client credentials come into being.
///
/// Selected by deployment configuration; a request shaped for the other mode
/// is rejected, never reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// The server generates credentials; an allow-list gates who registers
    ServerIssued,
    /// The caller supplies credentials; duplicate identifiers conflict
    CallerIssued,
}

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    /// Server-issued mode: fresh credentials, secret included this once
    Issued(IssuedClient),
    /// Caller-issued mode: stored as provided, secret never echoed
    Accepted(ClientPublicView),
}

/// Client registration service
pub struct RegistrationService {
    store: Arc<dyn ClientStore>,
    generator: CredentialGenerator,
    policy: Arc<dyn RegistrationPolicy>,
    mode: RegistrationMode,
}

impl RegistrationService {
    /// Create a new registration service for the configured mode
    pub fn new(
        store: Arc<dyn ClientStore>,
        generator: CredentialGenerator,
        policy: Arc<dyn RegistrationPolicy>,
        mode: RegistrationMode,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
            mode,
        }
    }

    /// Register a client according to the configured mode
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        match self.mode {
            RegistrationMode::ServerIssued => {
                if request.client_id.is_some() || request.client_secret.is_some() {
                    return Err(RegistrationError::ModeMismatch(
                        "client_id and client_secret are issued by the server".to_string(),
                    ));
                }
                let client_name = validate_client_name(request.client_name.as_deref())?;
                self.register_server_issued(client_name)
                    .await
                    .map(RegistrationOutcome::Issued)
            }
            RegistrationMode::CallerIssued => self
                .register_caller_issued(request)
                .await
                .map(RegistrationOutcome::Accepted),
        }
    }

    /// Look up the public view of a registered client
    pub async fn lookup(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientPublicView>, RegistrationError> {
        let record = self
            .store
            .get_client(client_id)
            .await
            .map_err(|e| RegistrationError::StorageFailure(e.to_string()))?;
        Ok(record.as_ref().map(ClientPublicView::from))
    }

    async fn register_server_issued(
        &self,
        client_name: String,
    ) -> Result<IssuedClient, RegistrationError> {
        if !self.policy.allows(&client_name) {
            return Err(RegistrationError::NotAllowed(client_name));
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let credentials = self.generator.generate();
            let record = ClientRecord {
                client_id: credentials.client_id,
                client_secret: credentials.client_secret,
                client_name: client_name.clone(),
                created_at: Utc::now(),
            };

            let inserted = self
                .store
                .put_client_if_absent(&record)
                .await
                .map_err(|e| RegistrationError::StorageFailure(e.to_string()))?;

            if inserted {
                tracing::debug!(client_id = %record.client_id, "registered client");
                return Ok(IssuedClient {
                    client_id: record.client_id,
                    client_secret: record.client_secret,
                    client_name: record.client_name,
                });
            }

            tracing::warn!(attempt, "generated client id collided, retrying");
        }

        Err(RegistrationError::GenerationExhausted)
    }

    async fn register_caller_issued(
        &self,
        request: RegisterRequest,
    ) -> Result<ClientPublicView, RegistrationError> {
        let client_id = validate_client_id(request.client_id.as_deref())?;
        let client_secret = validate_client_secret(request.client_secret.as_deref())?;
        let client_name = validate_client_name(request.client_name.as_deref())?;

        let record = ClientRecord {
            client_id,
            client_secret,
            client_name,
            created_at: Utc::now(),
        };

        let inserted = self
            .store
            .put_client_if_absent(&record)
            .await
            .map_err(|e| RegistrationError::StorageFailure(e.to_string()))?;
        if !inserted {
            return Err(RegistrationError::ClientIdTaken(record.client_id));
        }

        tracing::debug!(client_id = %record.client_id, "registered client");
        Ok(ClientPublicView::from(&record))
    }
}

fn validate_client_name(value: Option<&str>) -> Result<String, RegistrationError> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(RegistrationError::InvalidClientName(
            "client_name must be a non-empty string".to_string(),
        )),
    }
}

fn validate_client_id(value: Option<&str>) -> Result<String, RegistrationError> {
    let Some(client_id) = value.filter(|v| !v.is_empty()) else {
        return Err(RegistrationError::InvalidClientId(
            "client_id is required".to_string(),
        ));
    };

    // ':' falls outside the charset with everything else; it is the storage
    // key namespace separator.
    if !client_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RegistrationError::InvalidClientId(
            "client_id may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    if client_id.len() > CLIENT_ID_MAX_LENGTH {
        return Err(RegistrationError::InvalidClientId(format!(
            "client_id must be at most {} characters",
            CLIENT_ID_MAX_LENGTH
        )));
    }

    Ok(client_id.to_string())
}

fn validate_client_secret(value: Option<&str>) -> Result<String, RegistrationError> {
    match value {
        Some(secret) if secret.len() >= CLIENT_SECRET_MIN_LENGTH => Ok(secret.to_string()),
        _ => Err(RegistrationError::InvalidClientSecret(format!(
            "client_secret must be at least {} characters",
            CLIENT_SECRET_MIN_LENGTH
        ))),
    }
}
