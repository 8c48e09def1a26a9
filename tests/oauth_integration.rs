//! OAuth 2.0 Integration Tests
//!
//! These tests verify the complete registration and token issuance flows
//! including both registration modes, the allow-list policy, and verification
//! of minted tokens against the issuing secret.

use mockauth::errors::RegistrationError;
use mockauth::oauth::{
    AllowAllPolicy, AllowListPolicy, CredentialGenerator, RegistrationMode, RegistrationOutcome,
    RegistrationService, TokenService, TokenSigner, types::RegisterRequest,
};
use mockauth::storage::inmemory::MemoryClientStore;
use std::collections::HashSet;
use std::sync::Arc;

const SIGNING_SECRET: &str = "integration-signing-secret";

fn server_issued_service(store: Arc<MemoryClientStore>) -> RegistrationService {
    RegistrationService::new(
        store,
        CredentialGenerator::new("nhnace_"),
        Arc::new(AllowListPolicy::new(["nhnace-ai-search-test"])),
        RegistrationMode::ServerIssued,
    )
}

#[tokio::test]
async fn test_complete_server_issued_flow() {
    // Setup
    let store = Arc::new(MemoryClientStore::new());
    let registration = server_issued_service(store.clone());
    let tokens = TokenService::new(store.clone(), TokenSigner::new(SIGNING_SECRET), None, 3600);

    // Step 1: Dynamic Client Registration
    let outcome = registration
        .register(RegisterRequest {
            client_name: Some("nhnace-ai-search-test".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let issued = match outcome {
        RegistrationOutcome::Issued(client) => client,
        other => panic!("Expected issued credentials, got {other:?}"),
    };
    assert!(issued.client_id.starts_with("nhnace_"));
    assert!(!issued.client_secret.is_empty());
    assert_eq!(issued.client_name, "nhnace-ai-search-test");

    // Step 2: Token Exchange
    let response = tokens
        .issue_token(&issued.client_id, &issued.client_secret, "http://localhost")
        .await
        .unwrap();
    assert_eq!(response.expires_in, 3600);

    // Step 3: Verify the minted token against the issuing secret
    let claims = TokenSigner::new(SIGNING_SECRET)
        .verify(&response.access_token)
        .unwrap();
    assert_eq!(claims.sub, issued.client_id);
    assert_eq!(claims.iss, "http://localhost");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_complete_caller_issued_flow() {
    let store = Arc::new(MemoryClientStore::new());
    let registration = RegistrationService::new(
        store.clone(),
        CredentialGenerator::new(""),
        Arc::new(AllowAllPolicy),
        RegistrationMode::CallerIssued,
    );
    let tokens = TokenService::new(store.clone(), TokenSigner::new(SIGNING_SECRET), None, 600);

    let outcome = registration
        .register(RegisterRequest {
            client_name: Some("integration-app".to_string()),
            client_id: Some("integration-client".to_string()),
            client_secret: Some("integration-secret".to_string()),
        })
        .await
        .unwrap();
    let view = match outcome {
        RegistrationOutcome::Accepted(view) => view,
        other => panic!("Expected accepted registration, got {other:?}"),
    };
    assert_eq!(view.client_id, "integration-client");

    // Lookup returns the public projection only
    let looked_up = registration
        .lookup("integration-client")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(looked_up.client_name, "integration-app");

    // Token exchange with the caller-chosen credentials
    let response = tokens
        .issue_token("integration-client", "integration-secret", "http://localhost")
        .await
        .unwrap();
    assert_eq!(response.expires_in, 600);

    // A second registration of the same identifier conflicts
    let err = registration
        .register(RegisterRequest {
            client_name: Some("impostor".to_string()),
            client_id: Some("integration-client".to_string()),
            client_secret: Some("impostor-secret".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::ClientIdTaken(_)));

    // The first writer's secret still authenticates
    tokens
        .issue_token("integration-client", "integration-secret", "http://localhost")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_allow_list_gates_unlisted_names() {
    let store = Arc::new(MemoryClientStore::new());
    let registration = server_issued_service(store);

    let err = registration
        .register(RegisterRequest {
            client_name: Some("other-app".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::NotAllowed(_)));
    assert!(err.to_string().contains("not allowed"));
}

#[tokio::test]
async fn test_concurrent_registrations_issue_unique_ids() {
    let store = Arc::new(MemoryClientStore::new());
    let registration = Arc::new(server_issued_service(store));

    let tasks = (0..16).map(|_| {
        let registration = registration.clone();
        async move {
            registration
                .register(RegisterRequest {
                    client_name: Some("nhnace-ai-search-test".to_string()),
                    ..Default::default()
                })
                .await
                .unwrap()
        }
    });

    let outcomes = futures::future::join_all(tasks).await;

    let ids: HashSet<String> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            RegistrationOutcome::Issued(client) => client.client_id,
            other => panic!("Expected issued credentials, got {other:?}"),
        })
        .collect();
    assert_eq!(ids.len(), 16);
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_backend_round_trips_through_registration() {
    use mockauth::storage::{StorageBackend, create_client_store};

    let store = create_client_store(StorageBackend::Sqlite("sqlite::memory:".to_string()))
        .await
        .unwrap();
    let registration = RegistrationService::new(
        store.clone(),
        CredentialGenerator::new("nhnace_"),
        Arc::new(AllowListPolicy::new(["nhnace-ai-search-test"])),
        RegistrationMode::ServerIssued,
    );
    let tokens = TokenService::new(store, TokenSigner::new(SIGNING_SECRET), None, 3600);

    let outcome = registration
        .register(RegisterRequest {
            client_name: Some("nhnace-ai-search-test".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let issued = match outcome {
        RegistrationOutcome::Issued(client) => client,
        other => panic!("Expected issued credentials, got {other:?}"),
    };

    let response = tokens
        .issue_token(&issued.client_id, &issued.client_secret, "http://localhost")
        .await
        .unwrap();
    assert!(!response.access_token.is_empty());
}
