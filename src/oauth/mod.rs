//! OAuth 2.0 client registration and Client Credentials token issuance.

pub mod credentials;
pub mod policy;
pub mod registration;
pub mod signer;
pub mod tokens;
pub mod types;

// Re-export frequently used items from each module
pub use crate::storage::{inmemory::MemoryClientStore, traits::ClientStore};
pub use credentials::{ClientCredentials, CredentialGenerator};
pub use policy::{AllowAllPolicy, AllowListPolicy, RegistrationPolicy};
pub use registration::{RegistrationMode, RegistrationOutcome, RegistrationService};
pub use signer::{TokenClaims, TokenSigner};
pub use tokens::{TokenForm, TokenService};
pub use types::{
    ClientPublicView, ClientRecord, GrantType, IssuedClient, OAuthErrorResponse, RegisterRequest,
    TokenRequest, TokenResponse, TokenType,
};
