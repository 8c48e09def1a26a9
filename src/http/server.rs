//! Main router configuration assembling the registration and token endpoints.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    context::AppState,
    handler_index::handle_index,
    handler_register::{handle_get_client, handle_register_client},
    handler_token::handle_token,
};

/// Build the application router
pub fn build_router(ctx: AppState) -> Router {
    // Browser-based tooling drives these endpoints cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .route("/", get(handle_index))
        .route("/register", post(handle_register_client))
        .route("/register/{client_id}", get(handle_get_client))
        .route("/token", post(handle_token))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::credentials::CredentialGenerator;
    use crate::oauth::policy::AllowListPolicy;
    use crate::oauth::registration::{RegistrationMode, RegistrationService};
    use crate::oauth::signer::TokenSigner;
    use crate::oauth::tokens::TokenService;
    use crate::storage::inmemory::MemoryClientStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app_state() -> AppState {
        let store = Arc::new(MemoryClientStore::new());
        let registration_service = Arc::new(RegistrationService::new(
            store.clone(),
            CredentialGenerator::new("nhnace_"),
            Arc::new(AllowListPolicy::new(["nhnace-ai-search-test"])),
            RegistrationMode::ServerIssued,
        ));
        let token_service = Arc::new(TokenService::new(
            store,
            TokenSigner::new("test-signing-secret"),
            None,
            3600,
        ));

        AppState {
            registration_service,
            token_service,
        }
    }

    #[tokio::test]
    async fn test_index_route_responds() {
        let app = build_router(create_test_app_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
