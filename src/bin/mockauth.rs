//! Mock OAuth 2.0 authorization server binary.
//!
//! Main application entry point that wires configuration, storage, and the
//! registration and token services, then starts the HTTP server with
//! graceful shutdown.

use anyhow::Result;
use mockauth::{
    config::Config,
    http::{AppState, build_router},
    oauth::{
        credentials::CredentialGenerator,
        policy::{AllowAllPolicy, AllowListPolicy, RegistrationPolicy},
        registration::{RegistrationMode, RegistrationService},
        signer::TokenSigner,
        tokens::TokenService,
    },
    storage::{create_client_store, parse_storage_backend},
};
use std::{env, sync::Arc};

use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mockauth=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    let version = mockauth::config::version()?;

    env::args().for_each(|arg| {
        if arg == "--version" {
            println!("{version}");
            std::process::exit(0);
        }
    });

    tracing::info!(?version, "Starting mockauth");

    let config = Config::new()?;

    // Parse storage backend configuration
    let storage_backend =
        parse_storage_backend(&config.storage_backend, config.database_url.as_deref())?;
    let store = create_client_store(storage_backend).await?;

    // Caller-issued registration is auto-approve; the allow-list only gates
    // server-issued credentials.
    let policy: Arc<dyn RegistrationPolicy> = match config.registration_mode {
        RegistrationMode::ServerIssued => Arc::new(AllowListPolicy::new(
            config.allowed_client_names.as_ref().clone(),
        )),
        RegistrationMode::CallerIssued => Arc::new(AllowAllPolicy),
    };

    let registration_service = Arc::new(RegistrationService::new(
        store.clone(),
        CredentialGenerator::new(config.client_id_prefix.as_ref()),
        policy,
        config.registration_mode,
    ));

    let token_service = Arc::new(TokenService::new(
        store,
        TokenSigner::new(config.signing_secret.as_ref()),
        config.jwt_issuer.as_ref().clone(),
        *config.token_ttl.as_ref(),
    ));

    // Create application context
    let app_context = AppState {
        registration_service,
        token_service,
    };

    // Build the router
    let app = build_router(app_context);

    // Setup graceful shutdown
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    {
        let tracker = tracker.clone();
        let inner_token = token.clone();

        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::spawn(async move {
            tokio::select! {
                () = inner_token.cancelled() => { },
                _ = terminate => {},
                _ = ctrl_c => {},
            }

            tracker.close();
            inner_token.cancel();
        });
    }

    // Start HTTP server
    {
        let http_port = *config.http_port.as_ref();
        let inner_token = token.clone();
        tracker.spawn(async move {
            let bind_address = format!("0.0.0.0:{http_port}");
            tracing::info!("Starting server on {bind_address}");
            let listener = TcpListener::bind(&bind_address).await.unwrap();

            let shutdown_token = inner_token.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        () = shutdown_token.cancelled() => { }
                    }
                    tracing::info!("axum graceful shutdown complete");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("axum task failed: {}", err);
            }

            inner_token.cancel();
        });
    }

    tracker.wait().await;

    Ok(())
}
