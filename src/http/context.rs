//! Application state shared across request handlers.

use std::sync::Arc;

use crate::oauth::registration::RegistrationService;
use crate::oauth::tokens::TokenService;

#[derive(Clone)]
pub struct AppState {
    /// Registration service backing the dynamic client registration endpoints
    pub registration_service: Arc<RegistrationService>,
    /// Token issuance service for the Client Credentials grant
    pub token_service: Arc<TokenService>,
}
