//! Handles POST /register and GET /register/{client_id} - Dynamic client registration (RFC 7591 style)

use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};

use super::context::AppState;
use crate::errors::RegistrationError;
use crate::oauth::registration::RegistrationOutcome;
use crate::oauth::types::{ClientPublicView, OAuthErrorResponse, RegisterRequest};

fn error_body(error: &str, description: impl Into<String>) -> ResponseJson<OAuthErrorResponse> {
    ResponseJson(OAuthErrorResponse {
        error: error.to_string(),
        error_description: Some(description.into()),
    })
}

/// Handle dynamic client registration requests
pub async fn handle_register_client(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, (StatusCode, ResponseJson<OAuthErrorResponse>)> {
    let Json(request) = payload.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            error_body("invalid_request", "Invalid JSON body"),
        )
    })?;

    match state.registration_service.register(request).await {
        Ok(RegistrationOutcome::Issued(client)) => {
            Ok((StatusCode::CREATED, ResponseJson(client)).into_response())
        }
        Ok(RegistrationOutcome::Accepted(view)) => {
            Ok((StatusCode::CREATED, ResponseJson(view)).into_response())
        }
        Err(e) => {
            let (status, error_code, description) = match &e {
                RegistrationError::InvalidClientName(_)
                | RegistrationError::InvalidClientId(_)
                | RegistrationError::InvalidClientSecret(_)
                | RegistrationError::ModeMismatch(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_request", e.to_string())
                }
                RegistrationError::NotAllowed(_) => {
                    (StatusCode::FORBIDDEN, "access_denied", e.to_string())
                }
                RegistrationError::ClientIdTaken(_) => {
                    (StatusCode::CONFLICT, "invalid_client", e.to_string())
                }
                _ => {
                    tracing::error!(?e, "client registration failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "server_error",
                        "Internal server error".to_string(),
                    )
                }
            };

            Err((status, error_body(error_code, description)))
        }
    }
}

/// Handle public client metadata lookups
pub async fn handle_get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<ResponseJson<ClientPublicView>, (StatusCode, ResponseJson<OAuthErrorResponse>)> {
    match state.registration_service.lookup(&client_id).await {
        Ok(Some(view)) => Ok(ResponseJson(view)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            error_body("invalid_client", "client not found"),
        )),
        Err(e) => {
            tracing::error!(?e, "client lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("server_error", "Internal server error"),
            ))
        }
    }
}
