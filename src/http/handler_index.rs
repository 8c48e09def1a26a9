//! Handles GET / - Describes the service and the endpoints it exposes

use axum::Json;
use serde_json::{Value, json};

/// Handle requests to the index route
pub async fn handle_index() -> Json<Value> {
    Json(json!({
        "name": "mockauth",
        "endpoints": ["/token", "/register"],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let Json(body) = handle_index().await;
        assert_eq!(body["name"], "mockauth");
        let endpoints = body["endpoints"].as_array().unwrap();
        assert!(endpoints.contains(&json!("/token")));
        assert!(endpoints.contains(&json!("/register")));
    }
}
