//! Axum HTTP server handlers for the registration and token endpoints.

pub mod context;
mod handler_index;
mod handler_register;
mod handler_token;
pub mod server;

pub use context::AppState;
pub use server::build_router;
