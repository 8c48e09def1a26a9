//! Handles POST /token - Exchanges client credentials for a signed bearer token

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json as ResponseJson, Response},
};

use super::context::AppState;
use crate::errors::OAuthError;
use crate::oauth::tokens::TokenForm;
use crate::oauth::types::{OAuthErrorResponse, TokenRequest};

fn error_body(error: &str, description: impl Into<String>) -> ResponseJson<OAuthErrorResponse> {
    ResponseJson(OAuthErrorResponse {
        error: error.to_string(),
        error_description: Some(description.into()),
    })
}

/// Handle Client Credentials token requests
pub async fn handle_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Form<TokenForm>, FormRejection>,
) -> Result<Response, (StatusCode, ResponseJson<OAuthErrorResponse>)> {
    let Form(form) = payload.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            error_body("invalid_request", "Invalid form body"),
        )
    })?;

    let request = TokenRequest::try_from(form).map_err(|e| oauth_error(&e))?;

    let origin = request_origin(&headers);
    match state
        .token_service
        .issue_token(&request.client_id, &request.client_secret, &origin)
        .await
    {
        Ok(response) => Ok((
            [
                (header::CACHE_CONTROL, "no-store"),
                (header::PRAGMA, "no-cache"),
            ],
            ResponseJson(response),
        )
            .into_response()),
        Err(e) => Err(oauth_error(&e)),
    }
}

fn oauth_error(e: &OAuthError) -> (StatusCode, ResponseJson<OAuthErrorResponse>) {
    let (status, error_code) = match e {
        OAuthError::InvalidClient(_) => (StatusCode::UNAUTHORIZED, "invalid_client"),
        OAuthError::UnsupportedGrantType(_) => (StatusCode::BAD_REQUEST, "unsupported_grant_type"),
        OAuthError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        OAuthError::ServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
    };

    // Internal failure detail stays in the logs, not on the wire.
    let description = match e {
        OAuthError::ServerError(_) => {
            tracing::error!(?e, "token issuance failed");
            "Internal server error".to_string()
        }
        _ => e.to_string(),
    };

    (status, error_body(error_code, description))
}

fn request_origin(headers: &HeaderMap) -> String {
    // The server itself only speaks plain HTTP, so the scheme is fixed.
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| "http://localhost".to_string())
}
